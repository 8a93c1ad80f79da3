pub mod builders;
pub mod cli;
pub mod consts;
pub mod crds;
pub mod handlers;
pub mod kubernetes;
pub mod main_actions;
pub mod namespace;
pub mod replicas;
pub mod types;
pub mod validation;
