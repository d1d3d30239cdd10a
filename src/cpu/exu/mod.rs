//! 按指令组划分的执行单元

pub(crate) mod rv32i;
pub(crate) mod zicsr;

/// 执行单元的返回值
///
/// 外层 `None` 表示该执行单元不处理这条指令（交给下一个执行单元）；
/// 内层是 trace 注释文本，未开启 trace 时为 `None`。
pub(crate) type ExecResult = Option<Option<String>>;
