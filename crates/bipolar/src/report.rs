//! Text and JSON rendering of transform results.

use anyhow::{Context, Result};
use bipolar_core::{ActuatorCoord, ArmOptions, CartesianCoord, Solution, SolveStatus};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
struct ActuatorReport {
    alpha: f64,
    beta: f64,
    gamma: f64,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fault: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    held: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<String>,
}

impl ActuatorReport {
    fn exact(actuator: &ActuatorCoord) -> Self {
        Self {
            alpha: actuator.alpha,
            beta: actuator.beta,
            gamma: actuator.gamma,
            status: "exact",
            fault: None,
            held: None,
            warnings: None,
        }
    }

    fn from_solution(solution: &Solution) -> Self {
        let mut report = Self::exact(&solution.actuator);
        if let SolveStatus::Degraded { fault, substituted } = solution.status {
            report.status = "degraded";
            report.fault = Some(fault.to_string());
            report.held = Some(substituted.to_string());
        }
        if !solution.warnings.is_empty() {
            report.warnings = Some(solution.warnings.to_string());
        }
        report
    }
}

#[derive(Serialize)]
struct CartesianReport {
    x: f64,
    y: f64,
    z: f64,
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).context("failed to render JSON")
}

pub fn actuator(actuator: &ActuatorCoord, json: bool) -> Result<String> {
    if json {
        to_json(&ActuatorReport::exact(actuator))
    } else {
        Ok(actuator.to_string())
    }
}

pub fn solution(solution: &Solution, json: bool) -> Result<String> {
    if json {
        return to_json(&ActuatorReport::from_solution(solution));
    }

    let mut line = solution.actuator.to_string();
    if let SolveStatus::Degraded { fault, substituted } = solution.status {
        line.push_str(&format!(" [degraded: {fault}; held {substituted}]"));
    }
    if !solution.warnings.is_empty() {
        line.push_str(&format!(" [warn: {}]", solution.warnings));
    }
    Ok(line)
}

pub fn cartesian(cartesian: &CartesianCoord, json: bool) -> Result<String> {
    if json {
        to_json(&CartesianReport {
            x: cartesian.x,
            y: cartesian.y,
            z: cartesian.z,
        })
    } else {
        Ok(cartesian.to_string())
    }
}

/// Options are always rendered as a JSON object keyed by tag.
pub fn options(options: &ArmOptions) -> Result<String> {
    let map: BTreeMap<String, f64> = options
        .iter()
        .map(|(tag, value)| (tag.to_string(), value))
        .collect();
    to_json(&map)
}
