use std::collections::HashSet;

use crate::{
    delivery::{Delivery, StateTransition},
    delivery_state::DeliveryState,
};

/// Visualization tools for delivery routes
#[derive(Debug)]
pub struct RouteVisualization;

impl RouteVisualization {
    /// Generate a DOT graph representation of the delivery route
    ///
    /// The current state is highlighted. With `highlight_path`, transitions
    /// already taken are drawn in red.
    #[must_use]
    pub fn generate_dot(delivery: &Delivery, highlight_path: bool) -> String {
        let mut dot = String::from("digraph delivery {\n");
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=box, style=filled, fillcolor=lightblue];\n");

        for state in DeliveryState::ALL {
            let label = format!("{state}\\n{}", state.location());
            if state == delivery.current_state() {
                dot.push_str(&format!(
                    "  {state} [label=\"{label}\", fillcolor=palegreen, peripheries=2];\n"
                ));
            } else {
                dot.push_str(&format!("  {state} [label=\"{label}\"];\n"));
            }
        }

        let taken: HashSet<(DeliveryState, DeliveryState)> = if highlight_path {
            delivery.get_history().iter().map(|t| (t.from, t.to)).collect()
        } else {
            HashSet::new()
        };

        for from in DeliveryState::ALL {
            let to = from.next();
            let style = if taken.contains(&(from, to)) {
                "color=red, penwidth=2.0"
            } else {
                "color=black"
            };
            dot.push_str(&format!("  {from} -> {to} [label=\"advance\", {style}];\n"));
        }

        dot.push_str("}\n");
        dot
    }

    /// One-line view of the route with the current stop in brackets
    #[must_use]
    pub fn route_summary(delivery: &Delivery) -> String {
        DeliveryState::ALL
            .into_iter()
            .map(|state| {
                if state == delivery.current_state() {
                    format!("[{}]", state.location())
                } else {
                    state.location().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// Generate a markdown table of the history
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn history_table(transitions: &[StateTransition]) -> String {
        if transitions.is_empty() {
            return "No transitions recorded yet.".to_string();
        }

        let mut table = String::from("| # | From | To | Location |\n");
        table.push_str("|---|------|----|----------|\n");

        for (i, transition) in transitions.iter().enumerate() {
            table.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                i + 1,
                transition.from,
                transition.to,
                transition.to.location()
            ));
        }

        table
    }
}
