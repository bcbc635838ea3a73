//! The layout engine: constraint registration and dependency-ordered
//! evaluation
//!
//! The engine owns the element registry, the registered constraints, and the
//! unit conversion for the session. `evaluate_all` runs one full pass:
//! constraints are visited in registration order, with each constraint's
//! dependencies evaluated depth-first before the constraint itself.

use std::collections::HashMap;

use crate::layout::config::LayoutConfig;
use crate::layout::constraint::{Constraint, EdgeKey};
use crate::layout::error::LayoutError;
use crate::layout::types::{Element, Rect, Registry};
use crate::parser::parse_constraint;
use crate::units::Conversion;
use crate::EngineError;

/// Per-pass evaluation state of one constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EvalState {
    Unevaluated,
    InProgress,
    Evaluated,
}

pub struct LayoutEngine {
    conversion: Conversion,
    config: LayoutConfig,
    elements: Registry,
    constraints: Vec<Constraint>,
    by_target: HashMap<EdgeKey, usize>,
}

impl LayoutEngine {
    pub fn new(conversion: Conversion, config: LayoutConfig) -> Self {
        Self {
            conversion,
            config,
            elements: Registry::new(),
            constraints: vec![],
            by_target: HashMap::new(),
        }
    }

    /// Register an element id, rejecting duplicates
    pub fn add_element(&mut self, id: &str) -> Result<(), LayoutError> {
        self.elements.insert(Element::new(id))
    }

    /// Link a registered element to its parent
    pub fn set_parent(&mut self, child: &str, parent: &str) -> Result<(), LayoutError> {
        self.elements.set_parent(child, parent)
    }

    /// Parse and register one constraint line
    ///
    /// Aliases are resolved and references validated here, so a registered
    /// constraint can always be evaluated. Assigning an edge that an earlier
    /// constraint already targets is rejected.
    pub fn add_constraint(&mut self, line: &str) -> Result<(), EngineError> {
        let decl = parse_constraint(line)?;
        let constraint = Constraint::from_decl(decl.node, line, &self.elements)?;

        if let Some(&existing) = self.by_target.get(&constraint.target) {
            return Err(LayoutError::DoubleAssignment {
                target: constraint.target.to_string(),
                existing: self.constraints[existing].source.clone(),
            }
            .into());
        }

        self.by_target
            .insert(constraint.target.clone(), self.constraints.len());
        self.constraints.push(constraint);
        Ok(())
    }

    /// Parse and register a batch of constraint lines
    ///
    /// Lines are registered one at a time; on failure, lines registered
    /// earlier in the batch stay registered.
    pub fn add_constraints<I, S>(&mut self, lines: I) -> Result<(), EngineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.add_constraint(line.as_ref())?;
        }
        Ok(())
    }

    /// Run one full evaluation pass over every registered constraint
    ///
    /// Constraints with no mutual dependency evaluate in registration order,
    /// so a pass is deterministic. Running a second pass with no intervening
    /// additions leaves every edge store unchanged.
    pub fn evaluate_all(&mut self) -> Result<(), LayoutError> {
        let mut states = vec![EvalState::Unevaluated; self.constraints.len()];
        let mut stack = Vec::new();
        for index in 0..self.constraints.len() {
            evaluate_recursive(
                index,
                &self.constraints,
                &self.by_target,
                &mut self.elements,
                &self.conversion,
                &self.config,
                &mut states,
                &mut stack,
            )?;
        }
        Ok(())
    }

    /// Derive the placed rectangle for a registered element
    pub fn get_rect(&self, id: &str) -> Result<Rect, LayoutError> {
        Ok(self.elements.get(id)?.edges.rect(&self.config))
    }

    /// Evaluate every constraint, then derive all rectangles in registration
    /// order
    pub fn place_all(&mut self) -> Result<Vec<(String, Rect)>, LayoutError> {
        self.evaluate_all()?;
        let mut placements = Vec::with_capacity(self.elements.len());
        for id in self.elements.ids() {
            let rect = self.elements.get(id)?.edges.rect(&self.config);
            placements.push((id.to_string(), rect));
        }
        Ok(placements)
    }

    pub fn conversion(&self) -> &Conversion {
        &self.conversion
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// One-line-per-element placement report
    pub fn summary(&self) -> String {
        use std::fmt::Write;
        let mut out = String::new();
        for id in self.elements.ids() {
            let rect = self
                .elements
                .get(id)
                .map(|e| e.edges.rect(&self.config))
                .unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0));
            let _ = writeln!(
                out,
                "{}: at ({}, {}) size {}x{}",
                id, rect.x, rect.y, rect.width, rect.height
            );
        }
        out
    }
}

/// Evaluate one constraint after its targeted dependencies
///
/// `stack` holds the in-progress chain so a revisit can report the full
/// cycle. Dependencies that no constraint targets are not recursed into;
/// their values come straight from stored or derived edge state.
#[allow(clippy::too_many_arguments)]
fn evaluate_recursive(
    index: usize,
    constraints: &[Constraint],
    by_target: &HashMap<EdgeKey, usize>,
    elements: &mut Registry,
    conversion: &Conversion,
    config: &LayoutConfig,
    states: &mut [EvalState],
    stack: &mut Vec<usize>,
) -> Result<(), LayoutError> {
    match states[index] {
        EvalState::Evaluated => return Ok(()),
        EvalState::InProgress => {
            let start = stack.iter().position(|&i| i == index).unwrap_or(0);
            let mut cycle: Vec<String> = stack[start..]
                .iter()
                .map(|&i| constraints[i].target.to_string())
                .collect();
            cycle.push(constraints[index].target.to_string());
            return Err(LayoutError::circular(cycle));
        }
        EvalState::Unevaluated => {}
    }

    states[index] = EvalState::InProgress;
    stack.push(index);

    for dependency in constraints[index].dependencies() {
        if let Some(&dep_index) = by_target.get(&dependency) {
            evaluate_recursive(
                dep_index,
                constraints,
                by_target,
                elements,
                conversion,
                config,
                states,
                stack,
            )?;
        }
    }

    let constraint = &constraints[index];
    let value = constraint.evaluate(elements, conversion, config)?;
    elements.get_mut(&constraint.target.element)?.edges.set(
        &constraint.target.element,
        constraint.target.edge,
        value,
    )?;

    stack.pop();
    states[index] = EvalState::Evaluated;
    Ok(())
}
