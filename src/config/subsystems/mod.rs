pub mod fixer;
pub mod processor;
pub mod translator;

pub use fixer::FixerConfig;
pub use processor::ProcessorConfig;
pub use translator::TranslatorConfig;
