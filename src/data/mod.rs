/// Data layer: typed records, loading, filtering, aggregation and view diffing.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (education labels normalized)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  equality predicates → filtered records
///   └──────────┘
///        │                     │
///        │ (heart grid)        ▼
///        │              ┌───────────┐
///        │              │ aggregate  │  group by field → mean per group
///        │              └───────────┘
///        ▼                     ▼
///   ┌───────────┐
///   │ reconcile  │  diff by identity key → enter / update / exit
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod insights;
pub mod loader;
pub mod model;
pub mod reconcile;
