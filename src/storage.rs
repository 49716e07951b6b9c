use std::fs;
use std::io;
use std::path::Path;

use crate::bank;
use crate::models::QuestionBank;

/// 加载题库：文件存在则从TOML解析并校验，否则回退到内置题库
pub fn load_bank(path: &Path) -> io::Result<QuestionBank> {
    if !path.exists() {
        return Ok(bank::builtin());
    }

    let content = fs::read_to_string(path)?;
    let bank: QuestionBank =
        toml::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    bank.validate()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    Ok(bank)
}
