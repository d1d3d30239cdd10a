//! CPU 核心与执行引擎
//!
//! 本模块定义单线程 RV32I hart：
//! - 架构状态：通用寄存器文件、PC、指令计数器、CSR scratchpad
//! - `tick`: 取指 -> 解码 -> 分发到执行单元，一次恰好推进一条指令
//! - 停机语义：ECALL/EBREAK/非法指令/PC 未对齐都收敛为
//!   `CpuState::Halted`，停机后的 tick 是空操作
//!
//! 执行 trace 的左半部分复用反汇编渲染，右半部分由执行单元生成。

use std::fmt;

use crate::hex;
use crate::isa::{self, disasm, DecodedInstr};
use crate::memory::Memory;

mod exu;
mod regfile;

pub use regfile::RegFile;

/// CSR 地址空间大小
const CSR_COUNT: usize = 4096;

/// trace 行中反汇编文本的列宽
const INSTRUCTION_WIDTH: usize = 35;

/// 停机原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// tick 开始时 PC 未按 4 字节对齐
    PcAlignment,
    /// 取到无法解码的指令字
    IllegalInstruction,
    /// 执行了 ECALL
    Ecall,
    /// 执行了 EBREAK
    Ebreak,
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HaltReason::PcAlignment => "PC alignment error",
            HaltReason::IllegalInstruction => "Illegal instruction",
            HaltReason::Ecall => "ECALL instruction",
            HaltReason::Ebreak => "EBREAK instruction",
        })
    }
}

/// CPU 执行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuState {
    /// 正常运行中
    Running,
    /// 已停机；一旦进入此状态不再执行任何指令
    Halted(HaltReason),
}

/// 单线程 RV32I hart
///
/// # 示例
///
/// ```
/// use rv32i_sim::cpu::Hart;
/// use rv32i_sim::memory::Memory;
///
/// let mut mem = Memory::new(0x100);
/// mem.set32(0, 0x02A00093); // addi x1, x0, 42
///
/// let mut hart = Hart::new();
/// hart.tick(&mut mem, "");
/// assert_eq!(hart.read_reg(1), 42);
/// assert_eq!(hart.pc(), 4);
/// ```
pub struct Hart {
    regs: RegFile,
    pc: u32,
    insn_counter: u64,
    state: CpuState,
    mhartid: u32,
    csr: Vec<u32>,
    show_instructions: bool,
    show_registers: bool,
}

impl Hart {
    /// 创建一个已复位的 hart
    pub fn new() -> Self {
        Hart {
            regs: RegFile::new(),
            pc: 0,
            insn_counter: 0,
            state: CpuState::Running,
            mhartid: 0,
            csr: vec![0; CSR_COUNT],
            show_instructions: false,
            show_registers: false,
        }
    }

    /// 复位：PC 与计数器清零、寄存器文件复位、CSR 全部清零
    pub fn reset(&mut self) {
        self.pc = 0;
        self.insn_counter = 0;
        self.state = CpuState::Running;
        self.mhartid = 0;
        self.regs.reset();
        self.csr.fill(0);
    }

    /// 当前 PC
    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// 设置 PC
    pub fn set_pc(&mut self, pc: u32) {
        self.pc = pc;
    }

    /// 已派发执行的指令数（含导致停机的那条）
    pub fn insn_counter(&self) -> u64 {
        self.insn_counter
    }

    /// 当前执行状态
    pub fn state(&self) -> CpuState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: CpuState) {
        self.state = state;
    }

    /// 是否已停机
    pub fn is_halted(&self) -> bool {
        matches!(self.state, CpuState::Halted(_))
    }

    /// 停机原因；仍在运行时返回 None
    pub fn halt_reason(&self) -> Option<HaltReason> {
        match self.state {
            CpuState::Running => None,
            CpuState::Halted(reason) => Some(reason),
        }
    }

    /// 读寄存器；x0 恒为 0
    pub fn read_reg(&self, r: u8) -> i32 {
        self.regs.get(r)
    }

    /// 写寄存器；对 x0 的写被丢弃
    pub fn write_reg(&mut self, r: u8, val: i32) {
        self.regs.set(r, val);
    }

    /// 读 CSR
    pub fn csr_read(&self, addr: u16) -> u32 {
        self.csr[addr as usize & (CSR_COUNT - 1)]
    }

    /// 写 CSR
    pub fn csr_write(&mut self, addr: u16, val: u32) {
        self.csr[addr as usize & (CSR_COUNT - 1)] = val;
    }

    /// hart 编号；单 hart 配置下恒为 0
    pub fn mhartid(&self) -> u32 {
        self.mhartid
    }

    pub fn set_mhartid(&mut self, id: u32) {
        self.mhartid = id;
    }

    /// 是否在每次 tick 打印指令 trace
    pub fn set_show_instructions(&mut self, on: bool) {
        self.show_instructions = on;
    }

    /// 是否在每次 tick 之前打印寄存器
    pub fn set_show_registers(&mut self, on: bool) {
        self.show_registers = on;
    }

    /// 执行一条指令
    ///
    /// 停机后为空操作。流程：
    /// 1. 可选的寄存器 dump
    /// 2. PC 对齐检查：未对齐直接停机，这条不计入指令数
    /// 3. 计数、取指、解码、执行
    /// 4. 可选的指令 trace 输出
    pub fn tick(&mut self, mem: &mut Memory, hdr: &str) {
        if self.state != CpuState::Running {
            return;
        }

        if self.show_registers {
            self.dump(hdr);
        }

        if self.pc & 0x3 != 0 {
            self.state = CpuState::Halted(HaltReason::PcAlignment);
            return;
        }

        self.insn_counter += 1;

        let pc = self.pc;
        let word = mem.get32(pc);
        let decoded = isa::decode(word);
        let effect = self.execute(mem, &decoded, pc);

        if self.show_instructions {
            let text = disasm::render(pc, &decoded);
            println!("{}", trace_line(hdr, pc, word, &text, effect.as_deref()));
        }
    }

    /// 把已解码指令分发给各执行单元；都不认领时按非法指令停机
    ///
    /// 返回 trace 注释文本（未开启指令 trace 或停在非法指令时为 None）。
    fn execute(&mut self, mem: &mut Memory, decoded: &DecodedInstr, pc: u32) -> Option<String> {
        let trace = self.show_instructions;

        if let Some(effect) = exu::rv32i::execute(self, mem, decoded.instr, pc, trace) {
            return effect;
        }
        if let Some(effect) = exu::zicsr::execute(self, decoded.instr, pc, trace) {
            return effect;
        }

        self.state = CpuState::Halted(HaltReason::IllegalInstruction);
        None
    }

    /// 打印全部寄存器与 PC
    pub fn dump(&self, hdr: &str) {
        self.regs.dump(hdr);
        println!("{} pc {}", hdr, hex::to_hex32(self.pc));
    }
}

impl Default for Hart {
    fn default() -> Self {
        Self::new()
    }
}

/// 组装一行执行 trace
///
/// 反汇编文本左对齐补到固定列宽后接效果注释；
/// 没有注释（非法指令）时只输出文本本身。
fn trace_line(hdr: &str, pc: u32, word: u32, text: &str, effect: Option<&str>) -> String {
    match effect {
        Some(effect) => format!(
            "{}{}: {}  {:<width$}// {}",
            hdr,
            hex::to_hex32(pc),
            hex::to_hex32(word),
            text,
            effect,
            width = INSTRUCTION_WIDTH
        ),
        None => format!(
            "{}{}: {}  {}",
            hdr,
            hex::to_hex32(pc),
            hex::to_hex32(word),
            text
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::encode;

    /// 把程序按 4 字节一条写入内存地址 0 开始处
    fn write_program(mem: &mut Memory, words: &[u32]) {
        for (i, w) in words.iter().enumerate() {
            mem.set32((i * 4) as u32, *w);
        }
    }

    fn fresh() -> (Hart, Memory) {
        (Hart::new(), Memory::new(0x100))
    }

    #[test]
    fn test_addi_and_pc_advance() {
        let (mut hart, mut mem) = fresh();
        write_program(&mut mem, &[encode::addi(1, 0, 42)]);

        hart.tick(&mut mem, "");

        assert_eq!(hart.read_reg(1), 42);
        assert_eq!(hart.pc(), 4);
        assert_eq!(hart.insn_counter(), 1);
        assert_eq!(hart.state(), CpuState::Running);
    }

    #[test]
    fn test_add_sub() {
        let (mut hart, mut mem) = fresh();
        write_program(
            &mut mem,
            &[
                encode::addi(1, 0, 100),
                encode::addi(2, 0, 30),
                encode::add(3, 1, 2),
                encode::sub(4, 1, 2),
            ],
        );

        for _ in 0..4 {
            hart.tick(&mut mem, "");
        }

        assert_eq!(hart.read_reg(3), 130);
        assert_eq!(hart.read_reg(4), 70);
    }

    #[test]
    fn test_wrapping_add() {
        let (mut hart, mut mem) = fresh();
        // x1 = 0x7FFFFFFF; x1 = x1 + 1 回绕为最小负数
        write_program(
            &mut mem,
            &[
                encode::lui(1, 0x80000),
                encode::addi(1, 1, -1), // x1 = 0x7FFFFFFF
                encode::addi(1, 1, 1),
            ],
        );

        for _ in 0..3 {
            hart.tick(&mut mem, "");
        }
        assert_eq!(hart.read_reg(1) as u32, 0x8000_0000);
    }

    #[test]
    fn test_x0_write_is_dropped() {
        let (mut hart, mut mem) = fresh();
        write_program(&mut mem, &[encode::addi(0, 0, 42)]);
        hart.tick(&mut mem, "");
        assert_eq!(hart.read_reg(0), 0);
    }

    #[test]
    fn test_lui_auipc() {
        let (mut hart, mut mem) = fresh();
        write_program(&mut mem, &[encode::lui(1, 0x12345), encode::auipc(2, 0x1)]);

        hart.tick(&mut mem, "");
        hart.tick(&mut mem, "");

        assert_eq!(hart.read_reg(1) as u32, 0x12345000);
        // auipc 位于地址 4
        assert_eq!(hart.read_reg(2) as u32, 0x1004);
    }

    #[test]
    fn test_branches_taken_and_not_taken() {
        let (mut hart, mut mem) = fresh();
        write_program(
            &mut mem,
            &[
                encode::addi(1, 0, 5),
                encode::addi(2, 0, 5),
                encode::beq(1, 2, 8), // taken -> 0x10
                encode::addi(3, 0, 1), // 被跳过
                encode::bne(1, 2, 8),  // not taken
                encode::addi(4, 0, 1),
            ],
        );

        for _ in 0..5 {
            hart.tick(&mut mem, "");
        }

        assert_eq!(hart.read_reg(3), 0);
        assert_eq!(hart.read_reg(4), 1);
        assert_eq!(hart.insn_counter(), 5);
    }

    #[test]
    fn test_signed_vs_unsigned_compare() {
        // slt 把 -1 看作小于 1；sltu 把 0xFFFFFFFF 看作大于 1
        let (mut hart, mut mem) = fresh();
        write_program(
            &mut mem,
            &[
                encode::addi(1, 0, -1),
                encode::addi(2, 0, 1),
                encode::slt(3, 1, 2),
                encode::sltu(4, 1, 2),
                encode::ebreak(),
            ],
        );

        while !hart.is_halted() {
            hart.tick(&mut mem, "");
        }

        assert_eq!(hart.read_reg(3), 1);
        assert_eq!(hart.read_reg(4), 0);
    }

    #[test]
    fn test_sltiu_with_negative_imm() {
        // 立即数 -1 按无符号比较是最大值
        let (mut hart, mut mem) = fresh();
        write_program(&mut mem, &[encode::addi(1, 0, 7), encode::sltiu(2, 1, -1)]);
        hart.tick(&mut mem, "");
        hart.tick(&mut mem, "");
        assert_eq!(hart.read_reg(2), 1);
    }

    #[test]
    fn test_shifts() {
        let (mut hart, mut mem) = fresh();
        write_program(
            &mut mem,
            &[
                encode::addi(1, 0, -8),   // 0xFFFFFFF8
                encode::srai(2, 1, 2),    // 算术右移保持符号
                encode::srli(3, 1, 28),   // 逻辑右移补零
                encode::slli(4, 1, 4),
                encode::addi(5, 0, 33),
                encode::sll(6, 1, 5),     // 寄存器移位量只取低 5 位 -> 1
            ],
        );

        for _ in 0..6 {
            hart.tick(&mut mem, "");
        }

        assert_eq!(hart.read_reg(2), -2);
        assert_eq!(hart.read_reg(3) as u32, 0xF);
        assert_eq!(hart.read_reg(4) as u32, 0xFFFF_FF80);
        assert_eq!(hart.read_reg(6) as u32, 0xFFFF_FFF0);
    }

    #[test]
    fn test_store_load_roundtrip() {
        let (mut hart, mut mem) = fresh();
        write_program(
            &mut mem,
            &[
                encode::addi(1, 0, 0x55),
                encode::sb(1, 0x40, 0),
                encode::lbu(2, 0x40, 0),
                encode::ebreak(),
            ],
        );

        while !hart.is_halted() {
            hart.tick(&mut mem, "");
        }

        assert_eq!(hart.read_reg(2), 0x55);
        assert_eq!(mem.get8(0x40), 0x55);
        assert_eq!(hart.halt_reason(), Some(HaltReason::Ebreak));
    }

    #[test]
    fn test_load_sign_and_zero_extension() {
        let (mut hart, mut mem) = fresh();
        mem.set8(0x80, 0xFF);
        mem.set16(0x82, 0x8000);
        write_program(
            &mut mem,
            &[
                encode::lb(1, 0x80, 0),
                encode::lbu(2, 0x80, 0),
                encode::lh(3, 0x82, 0),
                encode::lhu(4, 0x82, 0),
            ],
        );

        for _ in 0..4 {
            hart.tick(&mut mem, "");
        }

        assert_eq!(hart.read_reg(1), -1);
        assert_eq!(hart.read_reg(2), 0xFF);
        assert_eq!(hart.read_reg(3), -32768);
        assert_eq!(hart.read_reg(4), 0x8000);
    }

    #[test]
    fn test_store_truncation() {
        let (mut hart, mut mem) = fresh();
        write_program(
            &mut mem,
            &[
                encode::lui(1, 0x12345),
                encode::addi(1, 1, 0x678), // x1 = 0x12345678
                encode::sw(1, 0x40, 0),
                encode::sh(1, 0x44, 0),
                encode::sb(1, 0x46, 0),
            ],
        );

        for _ in 0..5 {
            hart.tick(&mut mem, "");
        }

        assert_eq!(mem.get32(0x40), 0x12345678);
        assert_eq!(mem.get16(0x44), 0x5678);
        assert_eq!(mem.get8(0x46), 0x78);
    }

    #[test]
    fn test_jal_links_and_jumps() {
        let (mut hart, mut mem) = fresh();
        write_program(
            &mut mem,
            &[
                encode::jal(1, 8),  // -> 8, x1 = 4
                encode::ebreak(),   // 被跳过
                encode::ebreak(),   // 停在这里
            ],
        );

        while !hart.is_halted() {
            hart.tick(&mut mem, "");
        }

        assert_eq!(hart.read_reg(1), 4);
        assert_eq!(hart.pc(), 8);
        assert_eq!(hart.insn_counter(), 2);
        assert_eq!(hart.halt_reason(), Some(HaltReason::Ebreak));
    }

    #[test]
    fn test_jalr_masks_bit0() {
        let (mut hart, mut mem) = fresh();
        write_program(&mut mem, &[encode::addi(1, 0, 0x41), encode::jalr(2, 1, 0)]);

        hart.tick(&mut mem, "");
        hart.tick(&mut mem, "");

        // 0x41 & !1 = 0x40
        assert_eq!(hart.pc(), 0x40);
        assert_eq!(hart.read_reg(2), 8);
    }

    #[test]
    fn test_misaligned_pc_halts_without_counting() {
        let (mut hart, mut mem) = fresh();
        write_program(&mut mem, &[encode::addi(1, 0, 0x2), encode::jalr(0, 1, 0)]);

        hart.tick(&mut mem, "");
        hart.tick(&mut mem, ""); // jalr 到 0x2，本身计数
        assert_eq!(hart.insn_counter(), 2);
        assert_eq!(hart.pc(), 0x2);
        assert!(!hart.is_halted());

        hart.tick(&mut mem, ""); // 对齐检查失败，不计数
        assert_eq!(hart.insn_counter(), 2);
        assert_eq!(hart.halt_reason(), Some(HaltReason::PcAlignment));
    }

    #[test]
    fn test_illegal_instruction_halts_and_counts() {
        let (mut hart, mut mem) = fresh();
        write_program(&mut mem, &[0x00000000]);

        hart.tick(&mut mem, "");

        assert_eq!(hart.halt_reason(), Some(HaltReason::IllegalInstruction));
        assert_eq!(hart.insn_counter(), 1);
        assert_eq!(hart.pc(), 0);
    }

    #[test]
    fn test_halted_tick_is_noop() {
        let (mut hart, mut mem) = fresh();
        write_program(&mut mem, &[encode::ecall()]);

        hart.tick(&mut mem, "");
        assert_eq!(hart.halt_reason(), Some(HaltReason::Ecall));
        assert_eq!(hart.pc(), 0); // ecall 不前进 PC

        for _ in 0..5 {
            hart.tick(&mut mem, "");
        }
        assert_eq!(hart.insn_counter(), 1);
    }

    #[test]
    fn test_lui_addi_ebreak_program() {
        let (mut hart, mut mem) = fresh();
        write_program(
            &mut mem,
            &[
                encode::lui(1, 0x12345),
                encode::addi(1, 1, 0x678),
                encode::ebreak(),
            ],
        );

        while !hart.is_halted() {
            hart.tick(&mut mem, "");
        }

        assert_eq!(hart.read_reg(1) as u32, 0x12345678);
        assert_eq!(hart.pc(), 8);
        assert_eq!(hart.insn_counter(), 3);
        assert_eq!(hart.halt_reason(), Some(HaltReason::Ebreak));
    }

    #[test]
    fn test_csr_read_modify_write() {
        use crate::isa::CSR_MSCRATCH;

        let (mut hart, mut mem) = fresh();
        write_program(
            &mut mem,
            &[
                encode::addi(1, 0, 0x55),
                encode::csrrw(2, CSR_MSCRATCH, 1),  // x2 = 0, mscratch = 0x55
                encode::csrrs(3, CSR_MSCRATCH, 0),  // 纯读取
                encode::addi(4, 0, 0x0F),
                encode::csrrs(5, CSR_MSCRATCH, 4),  // mscratch |= 0x0F -> 0x5F
                encode::addi(6, 0, 0x50),
                encode::csrrc(7, CSR_MSCRATCH, 6),  // mscratch &= !0x50 -> 0x0F
                encode::csrrwi(8, CSR_MSCRATCH, 31), // mscratch = 31
                encode::csrrci(9, CSR_MSCRATCH, 1),  // mscratch &= !1 -> 30
                encode::csrrsi(10, CSR_MSCRATCH, 0), // zimm = 0：纯读取
            ],
        );

        for _ in 0..10 {
            hart.tick(&mut mem, "");
        }

        assert_eq!(hart.read_reg(2), 0);
        assert_eq!(hart.read_reg(3), 0x55);
        assert_eq!(hart.read_reg(5), 0x55);
        assert_eq!(hart.read_reg(7), 0x5F);
        assert_eq!(hart.read_reg(8), 0x0F);
        assert_eq!(hart.read_reg(9), 31);
        assert_eq!(hart.read_reg(10), 30);
        assert_eq!(hart.csr_read(CSR_MSCRATCH), 30);
    }

    #[test]
    fn test_csr_rd_x0_suppresses_writeback_only() {
        use crate::isa::CSR_MSCRATCH;

        let (mut hart, mut mem) = fresh();
        // csrrwi x0, mscratch, 7：rd = x0，CSR 仍被写
        write_program(&mut mem, &[encode::csrrwi(0, CSR_MSCRATCH, 7)]);
        hart.tick(&mut mem, "");
        assert_eq!(hart.csr_read(CSR_MSCRATCH), 7);
        assert_eq!(hart.read_reg(0), 0);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let (mut hart, mut mem) = fresh();
        write_program(&mut mem, &[encode::addi(1, 0, 1), encode::ecall()]);
        hart.tick(&mut mem, "");
        hart.tick(&mut mem, "");
        hart.csr_write(0x340, 0xAA);
        assert!(hart.is_halted());

        hart.reset();

        assert_eq!(hart.pc(), 0);
        assert_eq!(hart.insn_counter(), 0);
        assert_eq!(hart.state(), CpuState::Running);
        assert_eq!(hart.mhartid(), 0);
        assert_eq!(hart.csr_read(0x340), 0);
        assert_eq!(hart.read_reg(1) as u32, 0xF0F0_F0F0);
    }

    // ========== trace 文本 ==========

    #[test]
    fn test_trace_line_layout() {
        let line = trace_line("", 0, 0x123450B7, "lui     x1,0x12345", Some("x1 = 0x12345000"));
        assert_eq!(
            line,
            "00000000: 123450b7  lui     x1,0x12345                 // x1 = 0x12345000"
        );

        // 非法指令没有效果注释
        let line = trace_line("", 4, 0, "ERROR: UNIMPLEMENTED INSTRUCTION", None);
        assert_eq!(line, "00000004: 00000000  ERROR: UNIMPLEMENTED INSTRUCTION");

        // 行首 header 原样拼接
        let line = trace_line("h0-", 8, 0x73, "ecall", Some("HALT"));
        assert_eq!(
            line,
            "h0-00000008: 00000073  ecall                              // HALT"
        );
    }

    #[test]
    fn test_effect_strings() {
        let (mut hart, mut mem) = fresh();

        // ALU 效果
        let d = isa::decode(encode::addi(1, 0, 42));
        let eff = exu::rv32i::execute(&mut hart, &mut mem, d.instr, 0, true)
            .unwrap()
            .unwrap();
        assert_eq!(eff, "x1 = 0x0000002a");

        // auipc 效果展示加法过程
        let d = isa::decode(encode::auipc(4, 0xABCDE));
        let eff = exu::rv32i::execute(&mut hart, &mut mem, d.instr, 4, true)
            .unwrap()
            .unwrap();
        assert_eq!(eff, "x4 = 0x00000004 + 0xabcde000 = 0xabcde004");

        // 分支效果包含两个操作数与结果 PC
        hart.write_reg(1, 5);
        hart.write_reg(2, 5);
        let d = isa::decode(encode::beq(1, 2, 8));
        let eff = exu::rv32i::execute(&mut hart, &mut mem, d.instr, 0x10, true)
            .unwrap()
            .unwrap();
        assert_eq!(
            eff,
            "x1 = 0x00000005, x2 = 0x00000005, br_taken  pc = 0x00000018"
        );

        hart.write_reg(2, 6);
        let d = isa::decode(encode::beq(1, 2, 8));
        let eff = exu::rv32i::execute(&mut hart, &mut mem, d.instr, 0x10, true)
            .unwrap()
            .unwrap();
        assert_eq!(
            eff,
            "x1 = 0x00000005, x2 = 0x00000006, br_not_taken  pc = 0x00000014"
        );

        // store 效果
        hart.write_reg(3, 0x55);
        let d = isa::decode(encode::sb(3, 0x40, 0));
        let eff = exu::rv32i::execute(&mut hart, &mut mem, d.instr, 0, true)
            .unwrap()
            .unwrap();
        assert_eq!(eff, "mem[0x00000040] = 0x00000055");

        // load 效果
        let d = isa::decode(encode::lbu(4, 0x40, 0));
        let eff = exu::rv32i::execute(&mut hart, &mut mem, d.instr, 0, true)
            .unwrap()
            .unwrap();
        assert_eq!(eff, "x4 = mem[0x00000040] = 0x00000055");

        // ecall 效果
        let d = isa::decode(encode::ecall());
        let eff = exu::rv32i::execute(&mut hart, &mut mem, d.instr, 0, true)
            .unwrap()
            .unwrap();
        assert_eq!(eff, "HALT");
    }

    #[test]
    fn test_csr_effect_strings() {
        use crate::isa::CSR_MSCRATCH;

        let (mut hart, _mem) = fresh();

        hart.write_reg(1, 0x55);
        let d = isa::decode(encode::csrrw(2, CSR_MSCRATCH, 1));
        let eff = exu::zicsr::execute(&mut hart, d.instr, 0, true)
            .unwrap()
            .unwrap();
        assert_eq!(
            eff,
            "csr[0x340] was 0x00000000, now 0x00000055; x2 = 0x00000000"
        );

        // rd = x0 时注释不带写回部分
        let d = isa::decode(encode::csrrwi(0, CSR_MSCRATCH, 7));
        let eff = exu::zicsr::execute(&mut hart, d.instr, 4, true)
            .unwrap()
            .unwrap();
        assert_eq!(eff, "csr[0x340] was 0x00000055, now 0x00000007");
    }
}
