pub mod overrides;
pub mod stylesheet;
