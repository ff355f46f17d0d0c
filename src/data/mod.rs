/// Data layer: core types, loading, normalization, filtering and scoring.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet        GET /get-devices
///        │                              │
///        ▼                              ▼
///   ┌──────────┐                 ┌────────────┐
///   │  loader   │ ◄────────────── │ ApiSource  │
///   └──────────┘                 └────────────┘
///        │  parse rows → DeviceCollection (all text)
///        ▼
///   ┌────────────┐
///   │ normalize  │  "8 GB" → 8.0, "n/a" → absent
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  threshold AND processor → ScoredDevice (clamped score)
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
