mod batch;
mod check;
mod run;

pub use batch::Batch;
pub use check::Check;
pub use run::Run;
