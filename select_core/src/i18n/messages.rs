use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

pub const EN_US: &str = "en-us";
pub const ZH_CN: &str = "zh-cn";

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{([a-z_]+)\}").unwrap();
}

/// Upload message bundle for one locale.
///
/// Templates use `{file_name}` and `{accept}` for the type message and
/// `{file_size}` and `{maximum_size}` for the size message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadText {
    pub locale: String,
    pub not_allowed_file_type: String,
    pub beyond_maximal_file_size: String,
}

impl UploadText {
    pub fn en_us() -> Self {
        Self {
            locale: EN_US.to_string(),
            not_allowed_file_type:
                "Files with unsupported types: {file_name}. Supported file types: {accept}"
                    .to_string(),
            beyond_maximal_file_size:
                "Maximum file size (MB): {maximum_size}. File size exceeding the maximum value: {file_size} bytes"
                    .to_string(),
        }
    }

    pub fn zh_cn() -> Self {
        Self {
            locale: ZH_CN.to_string(),
            not_allowed_file_type:
                "支持的文件类型: \"{accept}\", 您上传的文件\"{file_name}\"不在允许范围内，请重新选择文件"
                    .to_string(),
            beyond_maximal_file_size:
                "最大支持上传{maximum_size}MB的文件, 您上传的文件大小为{file_size}字节, 超过可上传文件大小"
                    .to_string(),
        }
    }

    pub fn builtin() -> Vec<Self> {
        vec![Self::en_us(), Self::zh_cn()]
    }

    pub fn not_allowed_file_type_msg(&self, file_name: &str, accept: &str) -> String {
        render(
            &self.not_allowed_file_type,
            &[("file_name", file_name), ("accept", accept)],
        )
    }

    pub fn beyond_maximal_file_size_msg(&self, file_size: u64, maximum_size_mb: f64) -> String {
        let file_size = file_size.to_string();
        let maximum_size = maximum_size_mb.to_string();

        render(
            &self.beyond_maximal_file_size,
            &[("file_size", file_size.as_str()), ("maximum_size", maximum_size.as_str())],
        )
    }
}

/// Fills `{name}` tokens in a single pass over the template; substituted
/// values are never scanned again. Unknown tokens stay as written.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            values
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
