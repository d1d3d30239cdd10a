//! 反汇编渲染
//!
//! 把已解码指令渲染为规范汇编文本。渲染是纯函数，不做任何输出；
//! 静态反汇编与执行 trace 共用这里的文本。

use crate::hex;
use crate::isa::instr::{DecodedInstr, RvInstr};

/// 助记符字段宽度（ecall/ebreak 除外，按原样输出）
const MNEMONIC_WIDTH: usize = 8;

/// 无法解码的指令字的固定文本
pub const ILLEGAL_INSN_TEXT: &str = "ERROR: UNIMPLEMENTED INSTRUCTION";

/// 渲染助记符，右侧补空格到固定宽度
fn mnemonic(m: &str) -> String {
    format!("{:<width$}", m, width = MNEMONIC_WIDTH)
}

/// 渲染寄存器名 `xN`
pub(crate) fn render_reg(r: u8) -> String {
    format!("x{}", r)
}

/// 渲染基址 + 位移寻址操作数 `imm(xN)`
fn base_disp(rs1: u8, imm: i32) -> String {
    format!("{}({})", imm, render_reg(rs1))
}

/// U-type 的 20 位上立即数（已左移存储，显示时右移回来）
fn upper_imm(imm: i32) -> String {
    hex::to_hex0x20((imm as u32) >> 12)
}

/// 把 `addr` 处的指令渲染为汇编文本
///
/// B/J 型指令显示的是绝对目标地址（addr + 偏移）。
pub fn render(addr: u32, decoded: &DecodedInstr) -> String {
    let target = |offset: i32| hex::to_hex0x32(addr.wrapping_add(offset as u32));

    match decoded.instr {
        RvInstr::Lui { rd, imm } => {
            format!("{}{},{}", mnemonic("lui"), render_reg(rd), upper_imm(imm))
        }
        RvInstr::Auipc { rd, imm } => {
            format!("{}{},{}", mnemonic("auipc"), render_reg(rd), upper_imm(imm))
        }

        RvInstr::Jal { rd, offset } => {
            format!("{}{},{}", mnemonic("jal"), render_reg(rd), target(offset))
        }
        RvInstr::Jalr { rd, rs1, offset } => {
            format!("{}{},{}", mnemonic("jalr"), render_reg(rd), base_disp(rs1, offset))
        }

        RvInstr::Beq { rs1, rs2, offset } => render_btype(addr, "beq", rs1, rs2, offset),
        RvInstr::Bne { rs1, rs2, offset } => render_btype(addr, "bne", rs1, rs2, offset),
        RvInstr::Blt { rs1, rs2, offset } => render_btype(addr, "blt", rs1, rs2, offset),
        RvInstr::Bge { rs1, rs2, offset } => render_btype(addr, "bge", rs1, rs2, offset),
        RvInstr::Bltu { rs1, rs2, offset } => render_btype(addr, "bltu", rs1, rs2, offset),
        RvInstr::Bgeu { rs1, rs2, offset } => render_btype(addr, "bgeu", rs1, rs2, offset),

        RvInstr::Lb { rd, rs1, offset } => render_load("lb", rd, rs1, offset),
        RvInstr::Lh { rd, rs1, offset } => render_load("lh", rd, rs1, offset),
        RvInstr::Lw { rd, rs1, offset } => render_load("lw", rd, rs1, offset),
        RvInstr::Lbu { rd, rs1, offset } => render_load("lbu", rd, rs1, offset),
        RvInstr::Lhu { rd, rs1, offset } => render_load("lhu", rd, rs1, offset),

        RvInstr::Sb { rs1, rs2, offset } => render_store("sb", rs1, rs2, offset),
        RvInstr::Sh { rs1, rs2, offset } => render_store("sh", rs1, rs2, offset),
        RvInstr::Sw { rs1, rs2, offset } => render_store("sw", rs1, rs2, offset),

        RvInstr::Addi { rd, rs1, imm } => render_itype_alu("addi", rd, rs1, imm),
        RvInstr::Slti { rd, rs1, imm } => render_itype_alu("slti", rd, rs1, imm),
        RvInstr::Sltiu { rd, rs1, imm } => render_itype_alu("sltiu", rd, rs1, imm),
        RvInstr::Xori { rd, rs1, imm } => render_itype_alu("xori", rd, rs1, imm),
        RvInstr::Ori { rd, rs1, imm } => render_itype_alu("ori", rd, rs1, imm),
        RvInstr::Andi { rd, rs1, imm } => render_itype_alu("andi", rd, rs1, imm),

        RvInstr::Slli { rd, rs1, shamt } => render_itype_alu("slli", rd, rs1, i32::from(shamt)),
        RvInstr::Srli { rd, rs1, shamt } => render_itype_alu("srli", rd, rs1, i32::from(shamt)),
        RvInstr::Srai { rd, rs1, shamt } => render_itype_alu("srai", rd, rs1, i32::from(shamt)),

        RvInstr::Add { rd, rs1, rs2 } => render_rtype("add", rd, rs1, rs2),
        RvInstr::Sub { rd, rs1, rs2 } => render_rtype("sub", rd, rs1, rs2),
        RvInstr::Sll { rd, rs1, rs2 } => render_rtype("sll", rd, rs1, rs2),
        RvInstr::Slt { rd, rs1, rs2 } => render_rtype("slt", rd, rs1, rs2),
        RvInstr::Sltu { rd, rs1, rs2 } => render_rtype("sltu", rd, rs1, rs2),
        RvInstr::Xor { rd, rs1, rs2 } => render_rtype("xor", rd, rs1, rs2),
        RvInstr::Srl { rd, rs1, rs2 } => render_rtype("srl", rd, rs1, rs2),
        RvInstr::Sra { rd, rs1, rs2 } => render_rtype("sra", rd, rs1, rs2),
        RvInstr::Or { rd, rs1, rs2 } => render_rtype("or", rd, rs1, rs2),
        RvInstr::And { rd, rs1, rs2 } => render_rtype("and", rd, rs1, rs2),

        // ecall/ebreak 不补空格
        RvInstr::Ecall => "ecall".to_string(),
        RvInstr::Ebreak => "ebreak".to_string(),

        RvInstr::Csrrw { rd, rs1, csr } => render_csrrx("csrrw", rd, rs1, csr),
        RvInstr::Csrrs { rd, rs1, csr } => render_csrrx("csrrs", rd, rs1, csr),
        RvInstr::Csrrc { rd, rs1, csr } => render_csrrx("csrrc", rd, rs1, csr),
        RvInstr::Csrrwi { rd, zimm, csr } => render_csrrxi("csrrwi", rd, zimm, csr),
        RvInstr::Csrrsi { rd, zimm, csr } => render_csrrxi("csrrsi", rd, zimm, csr),
        RvInstr::Csrrci { rd, zimm, csr } => render_csrrxi("csrrci", rd, zimm, csr),

        RvInstr::Illegal { .. } => ILLEGAL_INSN_TEXT.to_string(),
    }
}

fn render_btype(addr: u32, m: &str, rs1: u8, rs2: u8, offset: i32) -> String {
    format!(
        "{}{},{},{}",
        mnemonic(m),
        render_reg(rs1),
        render_reg(rs2),
        hex::to_hex0x32(addr.wrapping_add(offset as u32))
    )
}

fn render_load(m: &str, rd: u8, rs1: u8, offset: i32) -> String {
    format!("{}{},{}", mnemonic(m), render_reg(rd), base_disp(rs1, offset))
}

fn render_store(m: &str, rs1: u8, rs2: u8, offset: i32) -> String {
    format!("{}{},{}", mnemonic(m), render_reg(rs2), base_disp(rs1, offset))
}

fn render_itype_alu(m: &str, rd: u8, rs1: u8, imm: i32) -> String {
    format!("{}{},{},{}", mnemonic(m), render_reg(rd), render_reg(rs1), imm)
}

fn render_rtype(m: &str, rd: u8, rs1: u8, rs2: u8) -> String {
    format!(
        "{}{},{},{}",
        mnemonic(m),
        render_reg(rd),
        render_reg(rs1),
        render_reg(rs2)
    )
}

fn render_csrrx(m: &str, rd: u8, rs1: u8, csr: u16) -> String {
    format!(
        "{}{},{},{}",
        mnemonic(m),
        render_reg(rd),
        hex::to_hex0x12(u32::from(csr)),
        render_reg(rs1)
    )
}

fn render_csrrxi(m: &str, rd: u8, zimm: u8, csr: u16) -> String {
    format!(
        "{}{},{},{}",
        mnemonic(m),
        render_reg(rd),
        hex::to_hex0x12(u32::from(csr)),
        zimm
    )
}
