//! RV32I 基础指令集执行单元
//!
//! 每个执行路径做三件事：按 32-bit 回绕算术计算结果、
//! 写回寄存器/内存并更新 PC、按需生成 trace 注释文本。
//! 注释文本里的数值一律是十六进制 0x 形式。

use super::ExecResult;
use crate::cpu::{CpuState, HaltReason, Hart};
use crate::hex;
use crate::isa::disasm::render_reg;
use crate::isa::RvInstr;
use crate::memory::Memory;

/// 执行 RV32I 指令。返回 `None` 表示该指令不属于本执行单元。
pub(crate) fn execute(
    hart: &mut Hart,
    mem: &mut Memory,
    instr: RvInstr,
    pc: u32,
    trace: bool,
) -> ExecResult {
    let effect = match instr {
        // ========== U-type ==========
        RvInstr::Lui { rd, imm } => {
            hart.write_reg(rd, imm);
            hart.set_pc(pc.wrapping_add(4));
            trace.then(|| format!("{} = {}", render_reg(rd), hex::to_hex0x32(imm as u32)))
        }
        RvInstr::Auipc { rd, imm } => {
            let val = pc.wrapping_add(imm as u32);
            hart.write_reg(rd, val as i32);
            hart.set_pc(pc.wrapping_add(4));
            trace.then(|| {
                format!(
                    "{} = {} + {} = {}",
                    render_reg(rd),
                    hex::to_hex0x32(pc),
                    hex::to_hex0x32(imm as u32),
                    hex::to_hex0x32(val)
                )
            })
        }

        // ========== 控制流 ==========
        RvInstr::Jal { rd, offset } => {
            let ret = pc.wrapping_add(4);
            let target = pc.wrapping_add(offset as u32);
            hart.write_reg(rd, ret as i32);
            hart.set_pc(target);
            trace.then(|| {
                format!(
                    "{} = {},  pc = {}",
                    render_reg(rd),
                    hex::to_hex0x32(ret),
                    hex::to_hex0x32(target)
                )
            })
        }
        RvInstr::Jalr { rd, rs1, offset } => {
            let ret = pc.wrapping_add(4);
            // 目标地址的 bit0 被硬件清零
            let target = (hart.read_reg(rs1) as u32).wrapping_add(offset as u32) & !1;
            hart.write_reg(rd, ret as i32);
            hart.set_pc(target);
            trace.then(|| {
                format!(
                    "{} = {},  pc = {}",
                    render_reg(rd),
                    hex::to_hex0x32(ret),
                    hex::to_hex0x32(target)
                )
            })
        }

        RvInstr::Beq { rs1, rs2, offset } => {
            exec_branch(hart, pc, rs1, rs2, offset, trace, |a, b| a == b)
        }
        RvInstr::Bne { rs1, rs2, offset } => {
            exec_branch(hart, pc, rs1, rs2, offset, trace, |a, b| a != b)
        }
        RvInstr::Blt { rs1, rs2, offset } => {
            exec_branch(hart, pc, rs1, rs2, offset, trace, |a, b| (a as i32) < (b as i32))
        }
        RvInstr::Bge { rs1, rs2, offset } => {
            exec_branch(hart, pc, rs1, rs2, offset, trace, |a, b| (a as i32) >= (b as i32))
        }
        RvInstr::Bltu { rs1, rs2, offset } => {
            exec_branch(hart, pc, rs1, rs2, offset, trace, |a, b| a < b)
        }
        RvInstr::Bgeu { rs1, rs2, offset } => {
            exec_branch(hart, pc, rs1, rs2, offset, trace, |a, b| a >= b)
        }

        // ========== Load ==========
        RvInstr::Lb { rd, rs1, offset } => {
            exec_load(hart, mem, pc, rd, rs1, offset, trace, |m, a| m.get8_sx(a))
        }
        RvInstr::Lh { rd, rs1, offset } => {
            exec_load(hart, mem, pc, rd, rs1, offset, trace, |m, a| m.get16_sx(a))
        }
        RvInstr::Lw { rd, rs1, offset } => {
            exec_load(hart, mem, pc, rd, rs1, offset, trace, |m, a| m.get32_sx(a))
        }
        RvInstr::Lbu { rd, rs1, offset } => {
            exec_load(hart, mem, pc, rd, rs1, offset, trace, |m, a| m.get8(a) as i32)
        }
        RvInstr::Lhu { rd, rs1, offset } => {
            exec_load(hart, mem, pc, rd, rs1, offset, trace, |m, a| m.get16(a) as i32)
        }

        // ========== Store ==========
        RvInstr::Sb { rs1, rs2, offset } => {
            exec_store(hart, mem, pc, rs1, rs2, offset, trace, |m, a, v| m.set8(a, v as u8))
        }
        RvInstr::Sh { rs1, rs2, offset } => {
            exec_store(hart, mem, pc, rs1, rs2, offset, trace, |m, a, v| m.set16(a, v as u16))
        }
        RvInstr::Sw { rs1, rs2, offset } => {
            exec_store(hart, mem, pc, rs1, rs2, offset, trace, |m, a, v| m.set32(a, v))
        }

        // ========== I-type 算术/逻辑 ==========
        RvInstr::Addi { rd, rs1, imm } => {
            let result = (hart.read_reg(rs1) as u32).wrapping_add(imm as u32);
            write_alu(hart, pc, rd, result, trace)
        }
        RvInstr::Slti { rd, rs1, imm } => {
            let result = (hart.read_reg(rs1) < imm) as u32;
            write_alu(hart, pc, rd, result, trace)
        }
        RvInstr::Sltiu { rd, rs1, imm } => {
            let result = ((hart.read_reg(rs1) as u32) < imm as u32) as u32;
            write_alu(hart, pc, rd, result, trace)
        }
        RvInstr::Xori { rd, rs1, imm } => {
            let result = hart.read_reg(rs1) as u32 ^ imm as u32;
            write_alu(hart, pc, rd, result, trace)
        }
        RvInstr::Ori { rd, rs1, imm } => {
            let result = hart.read_reg(rs1) as u32 | imm as u32;
            write_alu(hart, pc, rd, result, trace)
        }
        RvInstr::Andi { rd, rs1, imm } => {
            let result = hart.read_reg(rs1) as u32 & imm as u32;
            write_alu(hart, pc, rd, result, trace)
        }
        RvInstr::Slli { rd, rs1, shamt } => {
            let result = (hart.read_reg(rs1) as u32) << u32::from(shamt);
            write_alu(hart, pc, rd, result, trace)
        }
        RvInstr::Srli { rd, rs1, shamt } => {
            let result = (hart.read_reg(rs1) as u32) >> u32::from(shamt);
            write_alu(hart, pc, rd, result, trace)
        }
        RvInstr::Srai { rd, rs1, shamt } => {
            let result = (hart.read_reg(rs1) >> u32::from(shamt)) as u32;
            write_alu(hart, pc, rd, result, trace)
        }

        // ========== R-type 算术/逻辑 ==========
        RvInstr::Add { rd, rs1, rs2 } => {
            let result = (hart.read_reg(rs1) as u32).wrapping_add(hart.read_reg(rs2) as u32);
            write_alu(hart, pc, rd, result, trace)
        }
        RvInstr::Sub { rd, rs1, rs2 } => {
            let result = (hart.read_reg(rs1) as u32).wrapping_sub(hart.read_reg(rs2) as u32);
            write_alu(hart, pc, rd, result, trace)
        }
        RvInstr::Sll { rd, rs1, rs2 } => {
            let sh = hart.read_reg(rs2) as u32 & 0x1F;
            let result = (hart.read_reg(rs1) as u32) << sh;
            write_alu(hart, pc, rd, result, trace)
        }
        RvInstr::Slt { rd, rs1, rs2 } => {
            let result = (hart.read_reg(rs1) < hart.read_reg(rs2)) as u32;
            write_alu(hart, pc, rd, result, trace)
        }
        RvInstr::Sltu { rd, rs1, rs2 } => {
            let result = ((hart.read_reg(rs1) as u32) < hart.read_reg(rs2) as u32) as u32;
            write_alu(hart, pc, rd, result, trace)
        }
        RvInstr::Xor { rd, rs1, rs2 } => {
            let result = (hart.read_reg(rs1) ^ hart.read_reg(rs2)) as u32;
            write_alu(hart, pc, rd, result, trace)
        }
        RvInstr::Srl { rd, rs1, rs2 } => {
            let sh = hart.read_reg(rs2) as u32 & 0x1F;
            let result = (hart.read_reg(rs1) as u32) >> sh;
            write_alu(hart, pc, rd, result, trace)
        }
        RvInstr::Sra { rd, rs1, rs2 } => {
            let sh = hart.read_reg(rs2) as u32 & 0x1F;
            let result = (hart.read_reg(rs1) >> sh) as u32;
            write_alu(hart, pc, rd, result, trace)
        }
        RvInstr::Or { rd, rs1, rs2 } => {
            let result = (hart.read_reg(rs1) | hart.read_reg(rs2)) as u32;
            write_alu(hart, pc, rd, result, trace)
        }
        RvInstr::And { rd, rs1, rs2 } => {
            let result = (hart.read_reg(rs1) & hart.read_reg(rs2)) as u32;
            write_alu(hart, pc, rd, result, trace)
        }

        // ========== 系统指令：按停机处理，PC 不前进 ==========
        RvInstr::Ecall => {
            hart.set_state(CpuState::Halted(HaltReason::Ecall));
            trace.then(|| "HALT".to_string())
        }
        RvInstr::Ebreak => {
            hart.set_state(CpuState::Halted(HaltReason::Ebreak));
            trace.then(|| "HALT".to_string())
        }

        _ => return None,
    };

    Some(effect)
}

/// ALU 类指令共同的收尾：写回 rd、PC + 4、生成注释
fn write_alu(hart: &mut Hart, pc: u32, rd: u8, result: u32, trace: bool) -> Option<String> {
    hart.write_reg(rd, result as i32);
    hart.set_pc(pc.wrapping_add(4));
    trace.then(|| format!("{} = {}", render_reg(rd), hex::to_hex0x32(result)))
}

/// 条件分支：比较、选择下一个 PC、生成注释（含两个操作数与跳转结果）
fn exec_branch(
    hart: &mut Hart,
    pc: u32,
    rs1: u8,
    rs2: u8,
    offset: i32,
    trace: bool,
    take: impl Fn(u32, u32) -> bool,
) -> Option<String> {
    let a = hart.read_reg(rs1) as u32;
    let b = hart.read_reg(rs2) as u32;
    let taken = take(a, b);
    let next = if taken {
        pc.wrapping_add(offset as u32)
    } else {
        pc.wrapping_add(4)
    };
    hart.set_pc(next);
    trace.then(|| {
        format!(
            "{} = {}, {} = {}, {}  pc = {}",
            render_reg(rs1),
            hex::to_hex0x32(a),
            render_reg(rs2),
            hex::to_hex0x32(b),
            if taken { "br_taken" } else { "br_not_taken" },
            hex::to_hex0x32(next)
        )
    })
}

/// Load：计算地址、读取并扩展、写回 rd
fn exec_load(
    hart: &mut Hart,
    mem: &Memory,
    pc: u32,
    rd: u8,
    rs1: u8,
    offset: i32,
    trace: bool,
    load: impl Fn(&Memory, u32) -> i32,
) -> Option<String> {
    let addr = (hart.read_reg(rs1) as u32).wrapping_add(offset as u32);
    let val = load(mem, addr);
    hart.write_reg(rd, val);
    hart.set_pc(pc.wrapping_add(4));
    trace.then(|| {
        format!(
            "{} = mem[{}] = {}",
            render_reg(rd),
            hex::to_hex0x32(addr),
            hex::to_hex0x32(val as u32)
        )
    })
}

/// Store：计算地址、截断写入；注释里显示完整的 rs2 值
fn exec_store(
    hart: &mut Hart,
    mem: &mut Memory,
    pc: u32,
    rs1: u8,
    rs2: u8,
    offset: i32,
    trace: bool,
    store: impl Fn(&mut Memory, u32, u32),
) -> Option<String> {
    let addr = (hart.read_reg(rs1) as u32).wrapping_add(offset as u32);
    let val = hart.read_reg(rs2) as u32;
    store(mem, addr, val);
    hart.set_pc(pc.wrapping_add(4));
    trace.then(|| format!("mem[{}] = {}", hex::to_hex0x32(addr), hex::to_hex0x32(val)))
}
