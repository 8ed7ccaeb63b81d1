//! 样式解析器
//!
//! 从自由文本中提取 `selector { key: value; ... }` 块。
//! 不完整的规则不会报错：扫描在输入末尾静默截断，之前收集到的规则照常返回。

use serde::Serialize;
use std::collections::BTreeMap;

/// 样式属性表：camelCase 属性名 -> 原始值，按属性名有序
pub type StyleProperties = BTreeMap<String, String>;

/// 样式规则
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleRule {
    pub selector: String,
    #[serde(rename = "rule")]
    pub properties: StyleProperties,
}

/// 扫描游标
///
/// 每次 `parse` 调用新建，按值在各扫描步骤之间传递。
#[derive(Debug, Clone, Copy)]
struct Cursor<'a> {
    code: &'a str,
    index: usize,
    count: usize,
}

impl<'a> Cursor<'a> {
    fn new(code: &'a str) -> Self {
        Self {
            code,
            index: 0,
            count: code.len(),
        }
    }

    fn is_end(&self) -> bool {
        self.index >= self.count
    }

    fn skip_whitespace(mut self) -> Self {
        let bytes = self.code.as_bytes();
        while self.index < self.count && matches!(bytes[self.index], b' ' | b'\t' | b'\r' | b'\n') {
            self.index += 1;
        }
        self
    }

    /// 读取到下一个 `{` 之前的选择器，游标停在 `{` 上
    fn read_selector(self) -> Option<(&'a str, Self)> {
        let end = self.index + self.code[self.index..].find('{')?;
        let selector = self.code[self.index..end].trim();
        Some((selector, Self { index: end, ..self }))
    }

    /// 读取 `{` 与 `}` 之间的规则体，游标移到 `}` 之后
    fn read_block(self) -> Option<(&'a str, Self)> {
        let start = self.index + self.code[self.index..].find('{')?;
        let end = start + self.code[start..].find('}')?;
        let body = &self.code[start + 1..end];
        Some((body, Self { index: end + 1, ..self }))
    }
}

/// 样式解析器
pub struct StyleParser;

impl StyleParser {
    /// 解析样式文本，按出现顺序返回规则
    pub fn parse(input: &str) -> Vec<StyleRule> {
        let code = strip_comments(input);
        let mut rules = Vec::new();
        let mut cursor = Cursor::new(&code);

        while !cursor.is_end() {
            cursor = cursor.skip_whitespace();

            let Some((selector, next)) = cursor.read_selector() else {
                break;
            };
            // 空选择器同样视为读取失败
            if selector.is_empty() {
                break;
            }
            let Some((body, next)) = next.read_block() else {
                break;
            };

            rules.push(StyleRule {
                selector: selector.to_string(),
                properties: parse_declarations(body),
            });
            cursor = next;
        }

        rules
    }
}

/// 删除 `/* ... */` 注释（不嵌套，最短匹配，可跨行）
///
/// 没有闭合的 `/*` 原样保留。
pub fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("/*") {
        match rest[start + 2..].find("*/") {
            Some(len) => {
                out.push_str(&rest[..start]);
                rest = &rest[start + 2 + len + 2..];
            }
            None => break,
        }
    }

    out.push_str(rest);
    out
}

/// 解析规则体 `key:value;key:value`
///
/// 没有 `:` 的片段和空属性名直接跳过。
pub fn parse_declarations(body: &str) -> StyleProperties {
    let mut properties = StyleProperties::new();

    for item in body.split(';') {
        let Some((key, value)) = item.split_once(':') else {
            continue;
        };
        let key = to_camel_case(key.trim());
        if key.is_empty() {
            continue;
        }
        properties.insert(key, value.trim().to_string());
    }

    properties
}

/// `margin-top` -> `marginTop`
///
/// 连续的 `-` 连同其后的一个字符替换为该字符的大写；末尾多余的 `-` 丢弃。
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '-' {
            out.push(c);
            continue;
        }
        while chars.peek() == Some(&'-') {
            chars.next();
        }
        if let Some(next) = chars.next() {
            out.extend(next.to_uppercase());
        }
    }

    out
}
