//! 仿真环境
//!
//! 把内存、hart 与运行配置组合成一次完整的仿真：
//! 加载镜像 -> 可选的静态反汇编 -> 驱动循环 -> 可选的收尾 dump。
//!
//! # 示例
//!
//! ```no_run
//! use rv32i_sim::sim_env::{SimConfig, SimEnv};
//!
//! let config = SimConfig::new()
//!     .with_memory_size(0x200)
//!     .with_infile("program.bin");
//!
//! let mut env = SimEnv::from_config(config).expect("load failed");
//! env.run();
//! ```

use log::debug;

use crate::cpu::{CpuState, Hart};
use crate::hex;
use crate::isa::{self, disasm};
use crate::memory::{LoadError, Memory};

/// 默认内存大小（字节）
pub const DEFAULT_MEMORY_SIZE: u32 = 0x100;

/// 仿真配置
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// 内存大小（字节）；构造内存时向上取整到 16 的倍数
    pub memory_size: u32,
    /// 指令数上限，0 表示不限制
    pub exec_limit: u64,
    /// 执行前打印整个内存的反汇编
    pub disassemble: bool,
    /// 执行期间打印每条指令的 trace
    pub show_instructions: bool,
    /// 每次 tick 之前打印寄存器
    pub show_registers: bool,
    /// 执行结束后 dump hart 与内存
    pub dump_after: bool,
    /// 待加载的二进制镜像路径
    pub infile: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
            exec_limit: 0,
            disassemble: false,
            show_instructions: false,
            show_registers: false,
            dump_after: false,
            infile: String::new(),
        }
    }
}

impl SimConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_memory_size(mut self, size: u32) -> Self {
        self.memory_size = size;
        self
    }

    pub fn with_exec_limit(mut self, limit: u64) -> Self {
        self.exec_limit = limit;
        self
    }

    pub fn with_disassemble(mut self, on: bool) -> Self {
        self.disassemble = on;
        self
    }

    pub fn with_show_instructions(mut self, on: bool) -> Self {
        self.show_instructions = on;
        self
    }

    pub fn with_show_registers(mut self, on: bool) -> Self {
        self.show_registers = on;
        self
    }

    pub fn with_dump_after(mut self, on: bool) -> Self {
        self.dump_after = on;
        self
    }

    pub fn with_infile(mut self, path: impl Into<String>) -> Self {
        self.infile = path.into();
        self
    }
}

/// 仿真环境：一个 hart + 一块内存 + 运行配置
pub struct SimEnv {
    pub hart: Hart,
    pub memory: Memory,
    pub config: SimConfig,
}

impl SimEnv {
    /// 按配置创建仿真环境：分配内存、加载镜像、复位 hart
    pub fn from_config(config: SimConfig) -> Result<Self, LoadError> {
        let mut memory = Memory::new(config.memory_size);
        memory.load_file(&config.infile)?;

        let mut hart = Hart::new();
        hart.set_show_instructions(config.show_instructions);
        hart.set_show_registers(config.show_registers);

        debug!(
            "sim env ready: memory = {} bytes, exec_limit = {}",
            memory.size(),
            config.exec_limit
        );

        Ok(SimEnv {
            hart,
            memory,
            config,
        })
    }

    /// 静态反汇编整个内存，不触碰 hart 状态
    pub fn disassemble(&self) {
        disassemble(&self.memory);
    }

    /// 驱动循环
    ///
    /// 先把 x2 设为内存大小（程序由此得知内存上界），然后反复 tick：
    /// - exec_limit 为 0 时跑到停机为止
    /// - 否则跑到停机或指令数达到上限；达到上限不算停机，
    ///   此时只打印计数行，不打印停机原因行
    pub fn run(&mut self) {
        self.hart.write_reg(2, self.memory.size() as i32);

        let limit = self.config.exec_limit;
        if limit == 0 {
            while !self.hart.is_halted() {
                self.hart.tick(&mut self.memory, "");
            }
        } else {
            while !self.hart.is_halted() && self.hart.insn_counter() < limit {
                self.hart.tick(&mut self.memory, "");
            }
        }

        if let CpuState::Halted(reason) = self.hart.state() {
            println!("Execution terminated. Reason: {}", reason);
        }
        println!("{} instructions executed", self.hart.insn_counter());
    }

    /// 收尾 dump：hart（寄存器 + PC）在前，内存在后
    pub fn dump(&self) {
        self.hart.dump("");
        self.memory.dump();
    }
}

/// 对内存逐字反汇编：每 4 字节一行 `地址: 指令字  汇编文本`
pub fn disassemble(mem: &Memory) {
    for addr in (0..mem.size()).step_by(4) {
        let word = mem.get32(addr);
        println!(
            "{}: {}  {}",
            hex::to_hex32(addr),
            hex::to_hex32(word),
            disasm::render(addr, &isa::decode(word))
        );
    }
}
