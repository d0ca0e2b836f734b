mod cache_test;
mod config_test;
mod optimizer_test;
mod properties_test;
mod scenario_test;
mod support;
