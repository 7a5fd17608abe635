//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up from the
//! loaded configuration. This is the dependency injection point for the
//! binary.

use crate::application::{CheckUseCase, ConvertUseCase, DiffUseCase, PlanUseCase, VerifyUseCase};
use crate::config::Config;
use crate::error::ManifestResult;
use crate::infrastructure::{FileManifestStore, LocalFs};

pub type ConcreteCheckUseCase = CheckUseCase<LocalFs>;
pub type ConcreteDiffUseCase = DiffUseCase<LocalFs>;
pub type ConcreteVerifyUseCase = VerifyUseCase<LocalFs>;
pub type ConcretePlanUseCase = PlanUseCase<FileManifestStore, LocalFs>;
pub type ConcreteConvertUseCase = ConvertUseCase<LocalFs>;

pub fn create_check_use_case(config: &Config) -> ManifestResult<ConcreteCheckUseCase> {
    Ok(CheckUseCase::new(LocalFs::new(), config.validation_policy()?))
}

pub fn create_diff_use_case(config: &Config) -> ManifestResult<ConcreteDiffUseCase> {
    Ok(DiffUseCase::new(LocalFs::new(), config.validation_policy()?))
}

pub fn create_verify_use_case(config: &Config) -> ManifestResult<ConcreteVerifyUseCase> {
    Ok(VerifyUseCase::new(LocalFs::new(), config.validation_policy()?))
}

/// The store lives in `[store] dir`, relative to the working directory
pub fn create_plan_use_case(config: &Config) -> ManifestResult<ConcretePlanUseCase> {
    let store = FileManifestStore::new(&config.store.dir);
    Ok(PlanUseCase::new(
        store,
        LocalFs::new(),
        config.validation_policy()?,
    ))
}

pub fn create_convert_use_case(config: &Config) -> ManifestResult<ConcreteConvertUseCase> {
    Ok(ConvertUseCase::new(LocalFs::new(), config.validation_policy()?))
}
