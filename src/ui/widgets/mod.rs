// src/ui/widgets/mod.rs

// This file serves as the module declaration for all UI widgets.
pub mod footer; // Key hints for the current state.
pub mod input; // The target input field.
pub mod notification_popup; // Scan outcome and validation messages.
pub mod results; // The presented scan result.
pub mod summary; // Badge, safety gauge and counters.
pub mod tabs; // Scanner selector and locale switch.
