pub mod header;
pub mod region_picker;

pub use header::Header;
pub use region_picker::RegionPicker;
