//! 内存模型
//!
//! 本模块实现仿真器的字节寻址内存 `Memory`：
//! - 8/16/32 位小端读写，多字节访问由单字节访问组合而成
//! - 带符号扩展的读取变体，供 load 指令使用
//! - 越界访问不报错，仅向 stderr 打印一行警告，读返回 0、写被丢弃
//! - 从文件加载二进制镜像、按 16 字节一行 dump 全部内容

use std::fmt::Write as _;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::hex;

/// 新建内存时每个字节的填充值，便于在 dump 中识别未初始化区域
const FILL_BYTE: u8 = 0xA5;

/// 程序镜像加载错误
///
/// `Display` 文本即最终面向用户的出错信息，由调用方打印到 stderr。
#[derive(Debug, Error)]
pub enum LoadError {
    /// 输入文件无法打开（或读取中途失败）
    #[error("Can't open file '{path}' for reading.")]
    CantOpen { path: String },
    /// 镜像比内存大，有字节放不下
    #[error("Program too big.")]
    ProgramTooBig,
}

/// 字节寻址的小端内存
///
/// 构造时把请求的大小向上取整到 16 的倍数（dump 格式按 16 字节一行）。
///
/// # 示例
///
/// ```
/// use rv32i_sim::memory::Memory;
///
/// let mem = Memory::new(0x100);
/// assert_eq!(mem.size(), 0x100);
/// // 未初始化区域读出填充值
/// assert_eq!(mem.get32(0), 0xA5A5A5A5);
/// ```
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// 创建指定大小的内存，所有字节初始化为填充值
    pub fn new(size: u32) -> Self {
        let size = (size as usize + 15) & !15;
        Memory {
            data: vec![FILL_BYTE; size],
        }
    }

    /// 内存大小（字节数），等于底层存储的长度
    pub fn size(&self) -> u32 {
        self.data.len() as u32
    }

    /// 越界检查；越界时向 stderr 打印一行警告并返回 true
    fn check_illegal(&self, addr: u32) -> bool {
        if addr as usize >= self.data.len() {
            eprintln!("WARNING: Address out of range: {}", hex::to_hex0x32(addr));
            true
        } else {
            false
        }
    }

    /// 读取 addr 处的字节；越界时返回 0
    pub fn get8(&self, addr: u32) -> u8 {
        if self.check_illegal(addr) {
            0
        } else {
            self.data[addr as usize]
        }
    }

    /// 读取 16 位小端值（由两次字节读组合）
    pub fn get16(&self, addr: u32) -> u16 {
        u16::from(self.get8(addr)) | (u16::from(self.get8(addr.wrapping_add(1))) << 8)
    }

    /// 读取 32 位小端值（由两次 16 位读组合）
    pub fn get32(&self, addr: u32) -> u32 {
        u32::from(self.get16(addr)) | (u32::from(self.get16(addr.wrapping_add(2))) << 16)
    }

    /// 读取字节并符号扩展到 32 位
    pub fn get8_sx(&self, addr: u32) -> i32 {
        self.get8(addr) as i8 as i32
    }

    /// 读取 16 位值并符号扩展到 32 位
    pub fn get16_sx(&self, addr: u32) -> i32 {
        self.get16(addr) as i16 as i32
    }

    /// 读取 32 位值并按有符号数解释
    pub fn get32_sx(&self, addr: u32) -> i32 {
        self.get32(addr) as i32
    }

    /// 写入一个字节；越界时丢弃写入
    pub fn set8(&mut self, addr: u32, val: u8) {
        if !self.check_illegal(addr) {
            self.data[addr as usize] = val;
        }
    }

    /// 小端写入 16 位值（低字节在前）
    pub fn set16(&mut self, addr: u32, val: u16) {
        self.set8(addr, val as u8);
        self.set8(addr.wrapping_add(1), (val >> 8) as u8);
    }

    /// 小端写入 32 位值（由两次 16 位写组合）
    pub fn set32(&mut self, addr: u32, val: u32) {
        self.set16(addr, val as u16);
        self.set16(addr.wrapping_add(2), (val >> 16) as u16);
    }

    /// 从文件加载二进制镜像到地址 0
    ///
    /// 逐字节写入，直到文件结束。若某个字节会落在内存之外，
    /// 打印越界警告并返回 [`LoadError::ProgramTooBig`]；
    /// 恰好填满内存的镜像可以正常加载。
    ///
    /// 成功时返回加载的字节数。
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, LoadError> {
        let path = path.as_ref();
        let cant_open = || LoadError::CantOpen {
            path: path.display().to_string(),
        };

        let mut file = File::open(path).map_err(|_| cant_open())?;
        let mut image = Vec::new();
        file.read_to_end(&mut image).map_err(|_| cant_open())?;

        for (addr, byte) in image.iter().enumerate() {
            if self.check_illegal(addr as u32) {
                return Err(LoadError::ProgramTooBig);
            }
            self.data[addr] = *byte;
        }

        debug!(
            "loaded {} bytes from '{}' into {}-byte memory",
            image.len(),
            path.display(),
            self.data.len()
        );
        Ok(image.len())
    }

    /// 打印整个内存内容
    ///
    /// 每行 16 字节：起始地址、十六进制字节（第 8 与第 9 个之间多一个
    /// 空格）、以及夹在 `*` 之间的 ASCII 形式，不可打印字节显示为 `.`。
    pub fn dump(&self) {
        for base in (0..self.data.len()).step_by(16) {
            let mut line = String::new();
            let _ = write!(line, "{}: ", hex::to_hex32(base as u32));

            for j in 0..16 {
                let _ = write!(line, "{} ", hex::to_hex8(self.data[base + j]));
                if j == 7 {
                    line.push(' ');
                }
            }

            line.push('*');
            for j in 0..16 {
                let ch = self.data[base + j];
                line.push(if (0x20..0x7F).contains(&ch) {
                    ch as char
                } else {
                    '.'
                });
            }
            line.push('*');
            println!("{}", line);
        }
    }
}
