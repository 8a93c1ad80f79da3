pub mod defs;
pub mod impls;

pub use defs::{Function, FunctionSpec};

use kube::CustomResourceExt;

impl Function {
    pub fn generate_crd_yaml() -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&Function::crd())
    }
}
