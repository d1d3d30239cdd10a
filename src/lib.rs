//! rv32i_sim: RV32I 单 hart 指令级仿真库
//!
//! 本库实现了一个指令级精确的 RV32I 仿真引擎：把扁平二进制镜像
//! 装入字节寻址内存，复位单个 hart，然后逐条取指/译码/执行，
//! 直到停机或达到外部指定的指令数上限。
//!
//! # 模块结构
//!
//! - `hex`: 固定宽度十六进制格式化工具
//! - `isa`: 指令字段提取、表驱动解码与反汇编渲染
//! - `cpu`: hart 核心（寄存器文件、PC、CSR、执行引擎）
//! - `memory`: 字节寻址的小端内存模型
//! - `sim_env`: 仿真环境（配置、程序加载、驱动循环）

pub mod cpu;
pub mod hex;
pub mod isa;
pub mod memory;
pub mod sim_env;
