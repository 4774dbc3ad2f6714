// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only:
//   - No model math here (that's Layer 5)
//   - No printing here (that's Layer 1)
//   - No direct file access (that's Layer 6)
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// One prediction request, start to finish
pub mod predict_use_case;

// Stateful line-by-line interactive session
pub mod session_use_case;
