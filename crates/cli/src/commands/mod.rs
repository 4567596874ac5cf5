pub(crate) mod apps;
pub(crate) mod migrate;
pub(crate) mod serve;
pub(crate) mod vars;
