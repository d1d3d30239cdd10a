//! Zicsr 扩展执行单元
//!
//! 六条 CSR 指令共享同一套读-改-写骨架：
//! - csrrs/csrrc 在 rs1 = x0（或 zimm = 0）时只读不写
//! - 旧值只在 rd != x0 时写回
//! - CSR 本身是无副作用的 scratchpad，读取总是安全的

use super::ExecResult;
use crate::cpu::Hart;
use crate::hex;
use crate::isa::disasm::render_reg;
use crate::isa::RvInstr;

/// 执行 Zicsr 指令。返回 `None` 表示该指令不属于本执行单元。
pub(crate) fn execute(hart: &mut Hart, instr: RvInstr, pc: u32, trace: bool) -> ExecResult {
    let effect = match instr {
        RvInstr::Csrrw { rd, rs1, csr } => {
            let old = hart.csr_read(csr);
            let new = hart.read_reg(rs1) as u32;
            commit(hart, pc, rd, csr, old, new, trace)
        }
        RvInstr::Csrrs { rd, rs1, csr } => {
            let old = hart.csr_read(csr);
            let new = if rs1 != 0 {
                old | hart.read_reg(rs1) as u32
            } else {
                old
            };
            commit(hart, pc, rd, csr, old, new, trace)
        }
        RvInstr::Csrrc { rd, rs1, csr } => {
            let old = hart.csr_read(csr);
            let new = if rs1 != 0 {
                old & !(hart.read_reg(rs1) as u32)
            } else {
                old
            };
            commit(hart, pc, rd, csr, old, new, trace)
        }
        RvInstr::Csrrwi { rd, zimm, csr } => {
            let old = hart.csr_read(csr);
            commit(hart, pc, rd, csr, old, u32::from(zimm), trace)
        }
        RvInstr::Csrrsi { rd, zimm, csr } => {
            let old = hart.csr_read(csr);
            let new = if zimm != 0 { old | u32::from(zimm) } else { old };
            commit(hart, pc, rd, csr, old, new, trace)
        }
        RvInstr::Csrrci { rd, zimm, csr } => {
            let old = hart.csr_read(csr);
            let new = if zimm != 0 { old & !u32::from(zimm) } else { old };
            commit(hart, pc, rd, csr, old, new, trace)
        }
        _ => return None,
    };

    Some(effect)
}

/// 共同的收尾：写 CSR、旧值写回 rd（rd != x0 时）、PC + 4、生成注释
fn commit(
    hart: &mut Hart,
    pc: u32,
    rd: u8,
    csr: u16,
    old: u32,
    new: u32,
    trace: bool,
) -> Option<String> {
    hart.csr_write(csr, new);
    if rd != 0 {
        hart.write_reg(rd, old as i32);
    }
    hart.set_pc(pc.wrapping_add(4));
    trace.then(|| {
        let mut s = format!(
            "csr[{}] was {}, now {}",
            hex::to_hex0x12(u32::from(csr)),
            hex::to_hex0x32(old),
            hex::to_hex0x32(new)
        );
        if rd != 0 {
            s.push_str(&format!("; {} = {}", render_reg(rd), hex::to_hex0x32(old)));
        }
        s
    })
}
