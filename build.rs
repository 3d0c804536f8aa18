//! 构建脚本：编译 Slint 界面描述

fn main() {
    slint_build::compile("ui/app-window.slint").expect("Slint 界面编译失败");
}
