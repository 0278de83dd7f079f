/*!
Configuration of a context.

All configuration for a context is contained within a [Config], and each value is held by a [ConfigOption], which records the name and bounds of the value alongside the value.

```rust
# use clause_core::config::{Config, ReductionOrder};
let mut config = Config::default();

assert!(config.clause_db.reduction_order.set(ReductionOrder::PropConfl).is_ok());
assert!(config.clause_db.removal_ratio.set(1.5).is_err());
assert_eq!(config.clause_db.removal_ratio.value, 0.5);
```
*/

mod config_option;
pub use config_option::ConfigOption;

pub mod dbs;
use dbs::ClauseDBConfig;

mod lbd;
pub use lbd::LBD;

mod reduction_order;
pub use reduction_order::ReductionOrder;

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// Configuration of the clause database.
    pub clause_db: ClauseDBConfig,

    /// Permit subsumption of implicit (binary and ternary) clauses during a full reduction.
    pub subsume_implicit: ConfigOption<bool>,

    /// Verify a model against every stored clause before the model is returned.
    pub verify_model: ConfigOption<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clause_db: ClauseDBConfig::default(),

            subsume_implicit: ConfigOption {
                name: "subsume_implicit",
                min: false,
                max: true,
                value: true,
            },

            verify_model: ConfigOption {
                name: "verify_model",
                min: false,
                max: true,
                value: true,
            },
        }
    }
}
