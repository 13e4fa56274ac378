pub mod format;
pub mod layout;
pub mod style;
pub mod table;

pub use format::{ColumnFormat, FormatClass, ValueFormatSpec};
pub use layout::{LayoutPlan, LayoutPlanner, LayoutTuning};
pub use style::{
    BackgroundStyle, Color, ColumnStyle, ColumnStyleOverride, FontWeight, StyleCatalog,
    StyleResolver, StyleSpec,
};
pub use table::{CellValue, ColumnGroup, DataTable};
