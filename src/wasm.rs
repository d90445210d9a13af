//! WASM entry points for browser use.
//!
//! Inputs are the canvas's JSON node/edge arrays. Every function returns a
//! serialized `ValidationResult` (or a `CycleReport`); malformed input is
//! reported in the result's `errors` rather than thrown.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::model;
use crate::validate::{self, ValidationResult};

/// Full validation, run before save and export.
#[wasm_bindgen]
pub fn validate_workflow(nodes_json: &str, edges_json: &str) -> JsValue {
    let result = validate_workflow_inner(nodes_json, edges_json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn validate_workflow_inner(nodes_json: &str, edges_json: &str) -> ValidationResult {
    match model::parse_snapshot(nodes_json, edges_json) {
        Ok((nodes, edges)) => validate::validate_workflow(&nodes, &edges),
        Err(e) => ValidationResult::invalid(e.to_string()),
    }
}

/// Admission check for a connection being drawn.
#[wasm_bindgen]
pub fn can_connect(source: &str, target: &str, nodes_json: &str, edges_json: &str) -> JsValue {
    let result = can_connect_inner(source, target, nodes_json, edges_json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn can_connect_inner(
    source: &str,
    target: &str,
    nodes_json: &str,
    edges_json: &str,
) -> ValidationResult {
    match model::parse_snapshot(nodes_json, edges_json) {
        Ok((nodes, edges)) => validate::can_connect(source, target, &nodes, &edges),
        Err(e) => ValidationResult::invalid(e.to_string()),
    }
}

/// Raw acyclicity answer. `errors` is non-empty only when the input could
/// not be parsed, in which case `has_cycle` carries no information.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleReport {
    pub has_cycle: bool,
    pub errors: Vec<String>,
}

#[wasm_bindgen]
pub fn has_cycle(nodes_json: &str, edges_json: &str) -> JsValue {
    let report = has_cycle_inner(nodes_json, edges_json);
    serde_wasm_bindgen::to_value(&report).unwrap_or(JsValue::NULL)
}

fn has_cycle_inner(nodes_json: &str, edges_json: &str) -> CycleReport {
    match model::parse_snapshot(nodes_json, edges_json) {
        Ok((nodes, edges)) => CycleReport {
            has_cycle: validate::has_cycle(&nodes, &edges),
            errors: Vec::new(),
        },
        Err(e) => CycleReport {
            has_cycle: false,
            errors: vec![e.to_string()],
        },
    }
}

/// Required-field check for one node, for inline form hints.
#[wasm_bindgen]
pub fn validate_node(node_json: &str) -> JsValue {
    let result = validate_node_inner(node_json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn validate_node_inner(node_json: &str) -> ValidationResult {
    match model::parse_node(node_json) {
        Ok(node) => validate::validate_node(&node),
        Err(e) => ValidationResult::invalid(e.to_string()),
    }
}
