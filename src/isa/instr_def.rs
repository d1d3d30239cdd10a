//! 指令定义结构
//!
//! 每条指令由一组 mask/match 位加一个解码函数描述，
//! 同一份定义既用于解码，也用于指令表的冲突自检。

use super::instr::{DecodedInstr, RvInstr};

/// 指令定义
#[derive(Clone)]
pub struct InstrDef {
    /// 指令名称（调试与冲突报告用）
    pub name: &'static str,
    /// 匹配掩码：哪些位参与判定
    pub mask: u32,
    /// 匹配值：掩码覆盖的位应取的值
    pub match_val: u32,
    /// 解码函数：从原始编码提取字段并构造 RvInstr
    pub decode: fn(u32) -> RvInstr,
}

impl InstrDef {
    pub const fn new(
        name: &'static str,
        mask: u32,
        match_val: u32,
        decode: fn(u32) -> RvInstr,
    ) -> Self {
        Self {
            name,
            mask,
            match_val,
            decode,
        }
    }

    /// 指令字是否匹配此定义
    #[inline]
    pub fn matches(&self, raw: u32) -> bool {
        (raw & self.mask) == self.match_val
    }

    /// 按此定义解码指令字
    #[inline]
    pub fn decode_instr(&self, raw: u32) -> DecodedInstr {
        DecodedInstr {
            raw,
            instr: (self.decode)(raw),
        }
    }

    /// 两个定义是否冲突（存在同时匹配两者的指令字）
    pub fn conflicts_with(&self, other: &InstrDef) -> bool {
        let common = self.mask & other.mask;
        (self.match_val & common) == (other.match_val & common)
    }
}

impl std::fmt::Debug for InstrDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstrDef")
            .field("name", &self.name)
            .field("mask", &format_args!("0x{:08X}", self.mask))
            .field("match_val", &format_args!("0x{:08X}", self.match_val))
            .finish()
    }
}

// ========== 类型掩码常量 ==========

/// R-type：检查 opcode + funct3 + funct7。
/// 移位立即数指令（slli/srli/srai）也用这个掩码，shamt 位于 rs2 字段。
pub const R_TYPE_MASK: u32 = 0xFE00707F;

/// I/S/B-type：检查 opcode + funct3
pub const I_TYPE_MASK: u32 = 0x0000707F;

/// U/J-type：只检查 opcode
pub const U_TYPE_MASK: u32 = 0x0000007F;

/// 全字精确匹配（ECALL/EBREAK）
pub const EXACT_MASK: u32 = 0xFFFF_FFFF;

// ========== match 值构造 ==========

/// 构造 R-type（含 funct7）的 match 值
#[inline]
pub const fn r_match(funct7: u32, funct3: u32, opcode: u32) -> u32 {
    (funct7 << 25) | (funct3 << 12) | opcode
}

/// 构造按 funct3 区分的 match 值
#[inline]
pub const fn i_match(funct3: u32, opcode: u32) -> u32 {
    (funct3 << 12) | opcode
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::rv32i::RV32I_INSTRS;
    use crate::isa::zicsr::ZICSR_INSTRS;

    #[test]
    fn test_matches() {
        let add = RV32I_INSTRS.iter().find(|d| d.name == "ADD").unwrap();

        // add x3, x1, x2
        assert!(add.matches(0x002081B3));
        // sub x3, x1, x2：funct7 不同
        assert!(!add.matches(0x402081B3));
    }

    #[test]
    fn test_decode_instr() {
        let addi = RV32I_INSTRS.iter().find(|d| d.name == "ADDI").unwrap();
        let decoded = addi.decode_instr(0x02A00093); // addi x1, x0, 42
        assert_eq!(
            decoded.instr,
            RvInstr::Addi {
                rd: 1,
                rs1: 0,
                imm: 42
            }
        );
        assert_eq!(decoded.raw, 0x02A00093);
    }

    #[test]
    fn test_conflict_detection() {
        let d1 = InstrDef::new("T1", I_TYPE_MASK, i_match(0b000, 0x13), |_| RvInstr::Ecall);
        let d2 = InstrDef::new("T2", I_TYPE_MASK, i_match(0b000, 0x13), |_| RvInstr::Ebreak);
        let d3 = InstrDef::new("T3", I_TYPE_MASK, i_match(0b001, 0x13), |_| RvInstr::Ebreak);

        assert!(d1.conflicts_with(&d2));
        assert!(!d1.conflicts_with(&d3));
    }

    #[test]
    fn test_tables_have_no_conflicts() {
        // 整张指令表两两不冲突，保证解码结果与表内顺序无关
        let all: Vec<&InstrDef> = RV32I_INSTRS.iter().chain(ZICSR_INSTRS.iter()).collect();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert!(
                    !a.conflicts_with(b),
                    "{} conflicts with {}",
                    a.name,
                    b.name
                );
            }
        }
    }
}
