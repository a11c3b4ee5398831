pub mod climate_day_frame;
pub mod client_config;
pub mod interpolation_method;
pub mod keys;
pub mod site;
pub mod tmy_table;
pub mod tmy_variable;
