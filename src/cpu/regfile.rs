//! 通用寄存器文件
//!
//! 32 个有符号 32-bit 单元。x0 硬连线为 0：读恒为 0，写被丢弃。

use crate::hex;

/// 复位后 x1..x31 的填充值，便于在 dump 中发现未初始化的使用
const RESET_PATTERN: i32 = 0xF0F0_F0F0u32 as i32;

/// 寄存器文件 x0..x31
pub struct RegFile {
    regs: [i32; 32],
}

impl RegFile {
    /// 创建并复位一个寄存器文件
    pub fn new() -> Self {
        let mut rf = RegFile { regs: [0; 32] };
        rf.reset();
        rf
    }

    /// 复位：x0 = 0，x1..x31 = 填充值
    pub fn reset(&mut self) {
        self.regs[0] = 0;
        for r in self.regs[1..].iter_mut() {
            *r = RESET_PATTERN;
        }
    }

    /// 读寄存器；x0 与越界下标恒为 0
    #[inline]
    pub fn get(&self, r: u8) -> i32 {
        if r == 0 || r >= 32 {
            0
        } else {
            self.regs[r as usize]
        }
    }

    /// 写寄存器；对 x0 与越界下标的写被静默丢弃
    #[inline]
    pub fn set(&mut self, r: u8, val: i32) {
        if r > 0 && r < 32 {
            self.regs[r as usize] = val;
        }
    }

    /// 按 4 行 x 8 列打印全部寄存器，每行行首先打印 hdr
    pub fn dump(&self, hdr: &str) {
        for base in (0..32u8).step_by(8) {
            let row: Vec<String> = (base..base + 8)
                .map(|r| hex::to_hex32(self.get(r) as u32))
                .collect();
            println!("{}{:>3} {}", hdr, format!("x{}", base), row.join(" "));
        }
    }
}

impl Default for RegFile {
    fn default() -> Self {
        Self::new()
    }
}
