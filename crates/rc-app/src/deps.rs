//! # Application Dependencies / 应用依赖
//!
//! This module defines the dependency grouping for use case construction.
//! 此模块定义用例构造的依赖分组。
//!
//! **Note / 注意**: This is NOT a Builder pattern.
//! - No build steps / 无构建步骤
//! - No default values / 无默认值
//! - Just parameter grouping / 仅用于参数打包

use std::sync::Arc;

use rc_core::ports::{ClockPort, ConsoleEventPort, RegistryPort};

/// Application dependency grouping (non-Builder, just parameter grouping)
/// 应用依赖分组（非 Builder，仅参数打包）
#[derive(Clone)]
pub struct AppDeps {
    // Backend / 后端
    pub registry: Arc<dyn RegistryPort>,

    // System / 系统
    pub clock: Arc<dyn ClockPort>,

    // Presentation / 展示层
    pub events: Arc<dyn ConsoleEventPort>,
}
