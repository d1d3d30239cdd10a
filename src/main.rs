//! rv32i 命令行入口
//!
//! 用法：`rv32i [-d] [-i] [-r] [-z] [-l exec-limit] [-m hex-mem-size] infile`
//!
//! 流程：加载镜像 -> 可选反汇编(-d) -> 运行 -> 可选收尾 dump(-z)。
//! 用法错误与加载失败打印到 stderr 并以退出码 1 结束。

use std::process;

use clap::error::ErrorKind;
use clap::Parser;

use rv32i_sim::sim_env::{SimConfig, SimEnv};

/// RV32I 指令级仿真器
#[derive(Parser)]
#[command(name = "rv32i")]
struct Cli {
    /// 执行前显示整个内存的反汇编
    #[arg(short = 'd')]
    disassemble: bool,

    /// 执行期间打印每条指令
    #[arg(short = 'i')]
    show_instructions: bool,

    /// 每次 tick 之前打印寄存器
    #[arg(short = 'r')]
    show_registers: bool,

    /// 仿真结束后 dump 寄存器与内存
    #[arg(short = 'z')]
    dump_state: bool,

    /// 最大执行指令数（十进制，0 表示不限制）
    #[arg(short = 'l', value_name = "exec-limit", default_value_t = 0)]
    exec_limit: u64,

    /// 内存大小（十六进制字节数，默认 0x100）
    #[arg(
        short = 'm',
        value_name = "hex-mem-size",
        value_parser = parse_hex_size,
        default_value = "100"
    )]
    memory_size: u32,

    /// 二进制镜像文件，加载到地址 0
    #[arg(value_name = "infile")]
    infile: String,
}

/// `-m` 的参数按十六进制解析，0x 前缀可有可无
fn parse_hex_size(s: &str) -> Result<u32, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches("0X");
    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid hex memory size: {}", e))
}

fn main() {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            process::exit(code);
        }
    };

    let config = SimConfig::new()
        .with_memory_size(cli.memory_size)
        .with_exec_limit(cli.exec_limit)
        .with_disassemble(cli.disassemble)
        .with_show_instructions(cli.show_instructions)
        .with_show_registers(cli.show_registers)
        .with_dump_after(cli.dump_state)
        .with_infile(cli.infile);

    let mut env = match SimEnv::from_config(config) {
        Ok(env) => env,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    if env.config.disassemble {
        env.disassemble();
    }

    env.run();

    if env.config.dump_after {
        env.dump();
    }
}
