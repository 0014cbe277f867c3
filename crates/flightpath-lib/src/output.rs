//! Structured route summaries shared by the CLI and the HTTP service.

use std::fmt::Write;

use serde::Serialize;

use crate::graph::EdgeKind;
use crate::network::{LocationId, Network};
use crate::routing::{RouteAlgorithm, RoutePlan};

/// One airport on a planned route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStep {
    pub index: usize,
    pub id: LocationId,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// How this airport was reached; absent for the origin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival: Option<EdgeKind>,
    /// Length of the leg that reached this airport in km.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg_distance: Option<f64>,
}

/// Route plan with airport codes and names resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub algorithm: RouteAlgorithm,
    pub source: String,
    pub destination: String,
    /// Total distance rounded to whole kilometres.
    pub distance: u64,
    pub hops: Vec<String>,
    pub flights: usize,
    pub ground_hops: usize,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary with resolved airport codes.
    pub fn from_plan(network: &Network, plan: &RoutePlan) -> Self {
        let steps: Vec<RouteStep> = plan
            .steps
            .iter()
            .enumerate()
            .map(|(index, &id)| {
                // legs[i] ends at steps[i + 1]
                let leg = index.checked_sub(1).and_then(|i| plan.legs.get(i));
                RouteStep {
                    index,
                    id,
                    code: network.display_code(id),
                    name: network.location(id).map(|location| location.name.clone()),
                    arrival: leg.map(|leg| leg.kind),
                    leg_distance: leg.map(|leg| leg.distance),
                }
            })
            .collect();

        Self {
            algorithm: plan.algorithm,
            source: network.display_code(plan.start),
            destination: network.display_code(plan.goal),
            distance: plan.distance,
            hops: steps.iter().map(|step| step.code.clone()).collect(),
            flights: plan.flights(),
            ground_hops: plan.ground_hops(),
            steps,
        }
    }

    /// Human-friendly multi-line rendering.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Route from {} to {} ({} flights, {} ground hops; algorithm: {}):",
            self.source, self.destination, self.flights, self.ground_hops, self.algorithm
        );
        for step in &self.steps {
            let _ = write!(out, " - {}", step.code);
            if let Some(name) = &step.name {
                let _ = write!(out, " {name}");
            }
            if let (Some(kind), Some(distance)) = (step.arrival, step.leg_distance) {
                let _ = write!(out, " ({distance:.0} km {})", kind_label(kind));
            }
            out.push('\n');
        }
        let _ = writeln!(out, "\nTotal distance: {} km", self.distance);
        out
    }
}

fn kind_label(kind: EdgeKind) -> &'static str {
    match kind {
        EdgeKind::Flight => "flight",
        EdgeKind::Ground => "ground",
    }
}
