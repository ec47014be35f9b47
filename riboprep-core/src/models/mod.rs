pub mod count_table;
pub mod design;

// re-export for cleaner imports
pub use self::count_table::{CountMatrix, CountTable};
pub use self::design::{AssayType, Condition, ExperimentalDesign, SampleRecord};
