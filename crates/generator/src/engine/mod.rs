//! Generation and dual-rendering engine.
//!
//! This module turns catalog entries into text. It provides:
//! 1. **Generator:** Seeded RNG that draws each instance's operands once.
//! 2. **Instances:** The concrete operand values of one entry.
//! 3. **Renderer:** Encoder-call and assembly text from the same instance.
//! 4. **Emission:** The ordered record of everything a run produced.

/// Ordered emission record (instructions, sections, expansions).
pub mod emission;

/// Seeded generator driving a run.
pub mod generator;

/// Concrete instances of catalog entries.
pub mod instance;

/// Encoder-call and assembly rendering.
pub mod render;

pub use self::emission::{EmittedInstruction, Emission, Section};
pub use self::generator::Generator;
pub use self::instance::GeneratedInstance;
pub use self::render::{RenderedForm, Renderer};
