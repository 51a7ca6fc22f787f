//! Demo content for a fresh graph.

use tracing::{info, instrument};

use crate::data::{Category, CoreResult, Edge, NewNode, Node, RelationType, RequestContext};
use crate::services::nodes::NodeService;

/// Records created by [`seed_demo_graph`].
#[derive(Debug, Clone)]
pub struct DemoGraph {
    pub home: Node,
    pub plumbing: Node,
    pub radiator: Node,
    pub leaking_radiator: Node,
    pub edges: Vec<Edge>,
}

impl DemoGraph {
    pub fn nodes(&self) -> [&Node; 4] {
        [&self.home, &self.plumbing, &self.radiator, &self.leaking_radiator]
    }
}

/// Node definitions of the demo graph, root first.
pub fn demo_nodes() -> [NewNode; 4] {
    [
        NewNode::new("Home", Category::General)
            .with_summary("The starting point for all home improvement tasks."),
        NewNode::new("Plumbing", Category::Plumbing)
            .with_summary("Everything related to pipes, water, and drainage."),
        NewNode::new("Radiator", Category::Plumbing)
            .with_summary("Heating unit that warms the room."),
        NewNode::new("Fix Leaking Radiator", Category::Plumbing)
            .with_summary("How to diagnose and fix a leaking radiator.")
            .with_steps([
                "Identify the source of the leak",
                "Turn off the valve",
                "Tighten the nut",
                "Replace the valve if needed",
            ])
            .with_tools(["Adjustable Wrench", "Bucket", "Towel"])
            .with_materials(["PTFE Tape", "Replacement Valve"])
            .with_common_mistakes(["Overtightening the nut", "Not turning off the water"])
            .with_difficulty(3)
            .with_estimates("1 hour", "200 DKK"),
    ]
}

/// Replaces the whole graph with the demo chain
/// Home → Plumbing → Radiator → Fix Leaking Radiator (CHILD edges).
#[instrument(skip(service, ctx), fields(trace_id = %ctx.trace_id()))]
pub async fn seed_demo_graph(service: &NodeService, ctx: &RequestContext) -> CoreResult<DemoGraph> {
    service.clear(ctx).await?;

    let [home, plumbing, radiator, leak] = demo_nodes();
    let home = service.create_node(ctx, home).await?;
    let plumbing = service.create_node(ctx, plumbing).await?;
    let radiator = service.create_node(ctx, radiator).await?;
    let leaking_radiator = service.create_node(ctx, leak).await?;

    let mut edges = Vec::with_capacity(3);
    for (from, to) in [
        (&home, &plumbing),
        (&plumbing, &radiator),
        (&radiator, &leaking_radiator),
    ] {
        edges.push(
            service
                .create_edge(ctx, &from.id, &to.id, RelationType::Child)
                .await?,
        );
    }

    info!(nodes = 4, edges = edges.len(), "Seeded demo graph");

    Ok(DemoGraph {
        home,
        plumbing,
        radiator,
        leaking_radiator,
        edges,
    })
}
