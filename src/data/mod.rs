/// Data layer: metric rows, the sorted table, and loading.
///
/// Architecture:
/// ```text
///  URL / file / uploaded bytes (CSV)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + parse CSV → MetricTable (sorted by Label)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ MetricTable  │  Vec<MetricRow>, immutable once built
///   └─────────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
