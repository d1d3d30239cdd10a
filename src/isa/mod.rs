//! RISC-V ISA 抽象与解码
//!
//! - `RvInstr` / `DecodedInstr`: 指令的语义表示
//! - `fields`: 字段与立即数提取的纯函数
//! - `InstrDef`: mask/match 式的指令定义，表驱动解码
//! - `disasm`: 规范汇编文本渲染

pub mod disasm;
mod fields;
mod instr;
mod instr_def;
mod rv32i;
mod zicsr;

pub use fields::*;
pub use instr::{DecodedInstr, RvInstr};
pub use instr_def::InstrDef;
pub use rv32i::RV32I_INSTRS;
pub use zicsr::{CSR_MHARTID, CSR_MSCRATCH, ZICSR_INSTRS};

/// 解码一个 32-bit 指令字
///
/// 全函数：表中无匹配时落到 `RvInstr::Illegal`，任何输入都有结果。
pub fn decode(raw: u32) -> DecodedInstr {
    for def in RV32I_INSTRS.iter().chain(ZICSR_INSTRS.iter()) {
        if def.matches(raw) {
            return def.decode_instr(raw);
        }
    }
    DecodedInstr {
        raw,
        instr: RvInstr::Illegal { raw },
    }
}

#[cfg(test)]
pub(crate) mod encode;
#[cfg(test)]
mod tests;
