//! # 控制台日志模块
//!
//! 详细模式下向终端输出带颜色的过程日志。
//! 开关在构造时确定，关闭后所有方法都是空操作。

use colored::Colorize;

/// 详细模式日志记录器。
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    enabled: bool,
}

impl Logger {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// 输出一条黄色的过程日志。
    pub fn log(&self, msg: &str) {
        if self.enabled {
            println!("{}", msg.yellow());
        }
    }

    /// 输出一条绿色的成功日志。
    pub fn success(&self, msg: &str) {
        if self.enabled {
            println!("{}", msg.green());
        }
    }
}
