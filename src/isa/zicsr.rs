//! Zicsr 扩展（CSR 操作指令）的解码表
//!
//! 六条指令共用 SYSTEM opcode (0x73)，按 funct3 区分：
//! 001/010/011 为寄存器版本，101/110/111 为立即数版本，
//! zimm 复用 rs1 字段。

use crate::isa::fields::*;
use crate::isa::instr::RvInstr;
use crate::isa::instr_def::{i_match, InstrDef, I_TYPE_MASK};

/// Zicsr 指令定义表
pub static ZICSR_INSTRS: &[InstrDef] = &[
    InstrDef::new("CSRRW", I_TYPE_MASK, i_match(0b001, OP_SYSTEM), |raw| RvInstr::Csrrw {
        rd: rd(raw),
        rs1: rs1(raw),
        csr: csr_addr(raw),
    }),
    InstrDef::new("CSRRS", I_TYPE_MASK, i_match(0b010, OP_SYSTEM), |raw| RvInstr::Csrrs {
        rd: rd(raw),
        rs1: rs1(raw),
        csr: csr_addr(raw),
    }),
    InstrDef::new("CSRRC", I_TYPE_MASK, i_match(0b011, OP_SYSTEM), |raw| RvInstr::Csrrc {
        rd: rd(raw),
        rs1: rs1(raw),
        csr: csr_addr(raw),
    }),
    InstrDef::new("CSRRWI", I_TYPE_MASK, i_match(0b101, OP_SYSTEM), |raw| RvInstr::Csrrwi {
        rd: rd(raw),
        zimm: zimm(raw),
        csr: csr_addr(raw),
    }),
    InstrDef::new("CSRRSI", I_TYPE_MASK, i_match(0b110, OP_SYSTEM), |raw| RvInstr::Csrrsi {
        rd: rd(raw),
        zimm: zimm(raw),
        csr: csr_addr(raw),
    }),
    InstrDef::new("CSRRCI", I_TYPE_MASK, i_match(0b111, OP_SYSTEM), |raw| RvInstr::Csrrci {
        rd: rd(raw),
        zimm: zimm(raw),
        csr: csr_addr(raw),
    }),
];

// 测试中常用的 CSR 地址
#[allow(dead_code)]
pub const CSR_MSCRATCH: u16 = 0x340;
#[allow(dead_code)]
pub const CSR_MHARTID: u16 = 0xF14;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::decode;

    #[test]
    fn test_decode_csrrw() {
        // csrrw x1, mscratch, x2
        let decoded = decode(0x340110F3);
        assert_eq!(
            decoded.instr,
            RvInstr::Csrrw {
                rd: 1,
                rs1: 2,
                csr: CSR_MSCRATCH
            }
        );
    }

    #[test]
    fn test_decode_csrrs_x0() {
        // csrrs x3, mscratch, x0：纯读取
        let decoded = decode(0x340021F3);
        assert_eq!(
            decoded.instr,
            RvInstr::Csrrs {
                rd: 3,
                rs1: 0,
                csr: CSR_MSCRATCH
            }
        );
    }

    #[test]
    fn test_decode_csrrwi() {
        // csrrwi x10, mscratch, 31
        let decoded = decode(0x340FD573);
        assert_eq!(
            decoded.instr,
            RvInstr::Csrrwi {
                rd: 10,
                zimm: 31,
                csr: CSR_MSCRATCH
            }
        );
    }

    #[test]
    fn test_system_funct3_100_is_illegal() {
        // SYSTEM opcode 下 funct3=100 没有定义
        let decoded = decode(0x0000_4073);
        assert!(matches!(decoded.instr, RvInstr::Illegal { .. }));
    }
}
