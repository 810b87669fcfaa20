//! Dual rendering of generated instances.
//!
//! The [`Renderer`] turns one [`GeneratedInstance`] into its encoder call and
//! its assembly line. Label targets of multi-form entries are a rendering
//! parameter, so every form of an expansion is produced from the same
//! operand values in a single pass.

use crate::config::ApiConfig;
use crate::engine::instance::GeneratedInstance;
use crate::isa::format::{LabelTarget, Layout};
use crate::isa::operand::{Notation, Operand, OperandValue};
use crate::isa::ordering::AtomicKind;

/// The two texts of one emitted form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedForm {
    /// Encoder call, terminated by `;`.
    pub api: String,
    /// Assembly line without indentation.
    pub assembly: String,
}

/// Formats instances in both notations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Renderer {
    call_prefix: String,
    enum_scope: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(&ApiConfig::default())
    }
}

impl Renderer {
    /// Builds a renderer from the notation settings.
    pub fn new(api: &ApiConfig) -> Self {
        Self {
            call_prefix: api.call_prefix.clone(),
            enum_scope: api.enum_scope.clone(),
        }
    }

    /// Renders every form of `instance`: one per label target of a
    /// multi-form entry, otherwise a single unlabeled form.
    pub fn forms(&self, instance: &GeneratedInstance<'_>) -> Vec<(Option<LabelTarget>, RenderedForm)> {
        match instance.entry().format().multi_form() {
            Some(multi) => multi
                .targets()
                .iter()
                .map(|&target| (Some(target), self.render(instance, Some(target))))
                .collect(),
            None => vec![(None, self.render(instance, None))],
        }
    }

    /// Renders one form of `instance` with an optional label target.
    pub fn render(&self, instance: &GeneratedInstance<'_>, target: Option<LabelTarget>) -> RenderedForm {
        RenderedForm {
            api: self.api(instance, target),
            assembly: Self::assembly(instance, target),
        }
    }

    /// Encoder call text: `<prefix><name>(<args>);`.
    pub fn api(&self, instance: &GeneratedInstance<'_>, target: Option<LabelTarget>) -> String {
        let entry = instance.entry();
        let mut args = Vec::new();
        match entry.format().layout() {
            Layout::Slots(_) => {
                args.extend(render_all(instance.operands(), Notation::Api));
                if let Some(target) = target {
                    args.push(target.api_token(&self.call_prefix));
                }
                if let Some(rounding) = instance.rounding() {
                    args.push(format!("{}{}", self.enum_scope, rounding.mode()));
                }
            }
            Layout::Atomic { ordering, .. } => {
                args.extend(render_all(instance.operands(), Notation::Api));
                args.push(format!("{}{ordering}", self.enum_scope));
            }
            Layout::Fence => {
                if let Some(barriers) = instance.barriers() {
                    args.extend(barriers.iter().map(|b| format!("{}u", b.bits())));
                }
            }
        }
        format!("{}{}({});", self.call_prefix, entry.api_name(), args.join(", "))
    }

    /// Assembly line text: `<name>\t<operands>`, or just `<name>`.
    pub fn assembly(instance: &GeneratedInstance<'_>, target: Option<LabelTarget>) -> String {
        let entry = instance.entry();
        let operands = instance.operands();
        let args: Vec<String> = match entry.format().layout() {
            Layout::Slots(_) => {
                let mut args = render_all(operands, Notation::Assembly);
                if let Some(target) = target {
                    args.push(target.assembly_token().to_string());
                }
                if let Some(rounding) = instance.rounding().filter(|r| r.is_spelled()) {
                    args.push(rounding.mode().to_string());
                }
                args
            }
            Layout::Atomic { kind, .. } => {
                let reg = |i: usize| {
                    operands
                        .get(i)
                        .map(|op| op.render(Notation::Assembly))
                        .unwrap_or_default()
                };
                match kind {
                    AtomicKind::LoadReserved => vec![reg(0), format!("({})", reg(1))],
                    AtomicKind::StoreConditional => vec![reg(0), reg(1), format!("({})", reg(2))],
                    // The address register comes second in the encoder call.
                    AtomicKind::MemoryOperation => vec![reg(0), reg(2), format!("({})", reg(1))],
                }
            }
            Layout::Fence => instance
                .barriers()
                .map(|barriers| barriers.iter().map(|b| b.name()).collect())
                .unwrap_or_default(),
        };
        let name = entry.assembly_name();
        if args.is_empty() {
            name
        } else {
            format!("{name}\t{}", args.join(", "))
        }
    }

    /// Encoder statement binding `label` at the current position.
    pub fn bind(&self, label: &str) -> String {
        format!("{}bind({label});", self.call_prefix)
    }
}

fn render_all(operands: &[OperandValue], notation: Notation) -> Vec<String> {
    operands.iter().map(|op| op.render(notation)).collect()
}
