/// Data layer: log parsing, assembly and time filtering.
///
/// Architecture:
/// ```text
///  data/onokoro57/logs/*.txt
///        │
///        ▼
///   ┌──────────┐
///   │  parser   │  strip /// blocks, split tabs → RawTable per file
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ assembler  │  glob + concat + schema + numeric + CET → JST
///   └───────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SensorDataset │  timestamps, Vec<SensorSeries>
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  time window → visible row indices
///   └──────────┘
/// ```

pub mod assembler;
pub mod error;
pub mod filter;
pub mod model;
pub mod parser;
pub mod schema;
pub mod timestamp;
