/// SQL migrations for the graph store.
///
/// Applied in order on startup; every statement is idempotent.
pub fn generate_migrations() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "20250101000000_graph_schema",
            r#"
            -- Topic / task records
            CREATE TABLE IF NOT EXISTS nodes (
                id UUID PRIMARY KEY,
                title TEXT NOT NULL,
                category TEXT NOT NULL,
                ai_summary TEXT NOT NULL DEFAULT '',
                steps TEXT[] NOT NULL DEFAULT '{}',
                tools TEXT[] NOT NULL DEFAULT '{}',
                materials TEXT[] NOT NULL DEFAULT '{}',
                common_mistakes TEXT[] NOT NULL DEFAULT '{}',
                difficulty SMALLINT,
                time_estimate TEXT NOT NULL DEFAULT '',
                cost_estimate TEXT NOT NULL DEFAULT '',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );

            -- Directed relations; removed together with either endpoint
            CREATE TABLE IF NOT EXISTS edges (
                id UUID PRIMARY KEY,
                from_node_id UUID NOT NULL,
                to_node_id UUID NOT NULL,
                relation_type TEXT NOT NULL,
                CONSTRAINT fk_edge_from FOREIGN KEY (from_node_id) REFERENCES nodes(id) ON DELETE CASCADE,
                CONSTRAINT fk_edge_to FOREIGN KEY (to_node_id) REFERENCES nodes(id) ON DELETE CASCADE
            );
            "#,
        ),
        (
            "20250101000001_graph_indexes",
            r#"
            -- Neighborhood lookups hit both endpoints
            CREATE INDEX IF NOT EXISTS idx_edges_from_node_id ON edges(from_node_id);
            CREATE INDEX IF NOT EXISTS idx_edges_to_node_id ON edges(to_node_id);

            -- Seed ordering
            CREATE INDEX IF NOT EXISTS idx_nodes_created_at_id ON nodes(created_at, id);
            "#,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_ordered_and_unique() {
        let migrations = generate_migrations();
        let names: Vec<_> = migrations.iter().map(|(name, _)| *name).collect();

        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_edges_cascade_with_nodes() {
        let schema = generate_migrations()[0].1;
        assert!(schema.contains("CREATE TABLE IF NOT EXISTS nodes"));
        assert_eq!(schema.matches("ON DELETE CASCADE").count(), 2);
    }
}
