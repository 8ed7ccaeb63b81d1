//! 选择器解析与匹配
//!
//! 支持的语法：
//! - 复合选择器：`tag`、`*`、`#id`、`.class`、`[attr]`、`[attr=value]` 的任意组合
//! - 组合符：后代（空白）和子代（`>`）
//! - 逗号分隔的选择器列表
//!
//! 匹配本身不依赖具体的控件树，调用方通过 [`ElementView`] 提供元素信息。

/// 属性条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSelector {
    pub name: String,
    /// `None` 表示只检查属性是否存在
    pub value: Option<String>,
}

/// 复合选择器
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundSelector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<AttributeSelector>,
}

/// 组合符
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
}

/// 复杂选择器：最右侧的主体加上从右到左排列的祖先条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub key: CompoundSelector,
    pub ancestors: Vec<(Combinator, CompoundSelector)>,
}

/// 逗号分隔的选择器列表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList(pub Vec<Selector>);

/// 匹配时需要的元素视图
pub trait ElementView: Sized {
    fn tag(&self) -> &str;
    fn attribute(&self, name: &str) -> Option<&str>;
    /// 父元素；到达查询根时返回 `None`
    fn parent(&self) -> Option<Self>;
}

impl SelectorList {
    /// 解析选择器列表，任一部分无法解析时返回 `None`
    pub fn parse(input: &str) -> Option<Self> {
        let selectors = input
            .split(',')
            .map(Selector::parse)
            .collect::<Option<Vec<_>>>()?;
        Some(Self(selectors))
    }

    pub fn matches<E: ElementView>(&self, element: &E) -> bool {
        self.0.iter().any(|s| s.matches(element))
    }
}

impl Selector {
    pub fn parse(input: &str) -> Option<Self> {
        let mut compounds: Vec<CompoundSelector> = Vec::new();
        let mut combinators: Vec<Combinator> = Vec::new();
        let mut pending: Option<Combinator> = None;

        for token in tokenize(input)? {
            match token {
                Token::Child => {
                    if compounds.is_empty() || pending == Some(Combinator::Child) {
                        return None;
                    }
                    pending = Some(Combinator::Child);
                }
                Token::Space => {
                    if !compounds.is_empty() && pending.is_none() {
                        pending = Some(Combinator::Descendant);
                    }
                }
                Token::Compound(text) => {
                    let compound = parse_compound(&text)?;
                    if !compounds.is_empty() {
                        combinators.push(pending.take().unwrap_or(Combinator::Descendant));
                    }
                    compounds.push(compound);
                }
            }
        }

        // 末尾悬空的 `>`
        if pending == Some(Combinator::Child) {
            return None;
        }

        let key = compounds.pop()?;
        let ancestors = combinators.into_iter().rev().zip(compounds.into_iter().rev()).collect();
        Some(Self { key, ancestors })
    }

    pub fn matches<E: ElementView>(&self, element: &E) -> bool {
        self.key.matches(element) && match_ancestors(&self.ancestors, element)
    }
}

fn match_ancestors<E: ElementView>(ancestors: &[(Combinator, CompoundSelector)], element: &E) -> bool {
    let Some(((combinator, compound), rest)) = ancestors.split_first() else {
        return true;
    };

    match combinator {
        Combinator::Child => match element.parent() {
            Some(parent) => compound.matches(&parent) && match_ancestors(rest, &parent),
            None => false,
        },
        Combinator::Descendant => {
            let mut current = element.parent();
            while let Some(ancestor) = current {
                if compound.matches(&ancestor) && match_ancestors(rest, &ancestor) {
                    return true;
                }
                current = ancestor.parent();
            }
            false
        }
    }
}

impl CompoundSelector {
    pub fn matches<E: ElementView>(&self, element: &E) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.attribute("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let classes = element.attribute("class").unwrap_or("");
            if !self.classes.iter().all(|c| classes.split_whitespace().any(|have| have == c)) {
                return false;
            }
        }
        self.attributes.iter().all(|attr| match (&attr.value, element.attribute(&attr.name)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(want), Some(have)) => want == have,
        })
    }
}

enum Token {
    Space,
    Child,
    Compound(String),
}

/// 拆分为复合选择器与组合符；方括号内的空白和 `>` 不参与拆分
fn tokenize(input: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut buffer = String::new();
    let mut in_brackets = false;

    for ch in input.trim().chars() {
        if in_brackets {
            buffer.push(ch);
            if ch == ']' {
                in_brackets = false;
            }
            continue;
        }
        match ch {
            '[' => {
                in_brackets = true;
                buffer.push(ch);
            }
            '>' => {
                flush(&mut buffer, &mut tokens);
                tokens.push(Token::Child);
            }
            c if c.is_whitespace() => {
                flush(&mut buffer, &mut tokens);
                tokens.push(Token::Space);
            }
            c => buffer.push(c),
        }
    }

    if in_brackets {
        return None;
    }
    flush(&mut buffer, &mut tokens);
    Some(tokens)
}

fn flush(buffer: &mut String, tokens: &mut Vec<Token>) {
    if !buffer.is_empty() {
        tokens.push(Token::Compound(std::mem::take(buffer)));
    }
}

fn parse_compound(text: &str) -> Option<CompoundSelector> {
    let mut compound = CompoundSelector::default();
    let mut chars = text.chars().peekable();

    // 开头的标签名或 `*`
    let mut tag = String::new();
    while let Some(&ch) = chars.peek() {
        if matches!(ch, '#' | '.' | '[') {
            break;
        }
        tag.push(ch);
        chars.next();
    }
    if !tag.is_empty() && tag != "*" {
        if !tag.chars().all(is_name_char) {
            return None;
        }
        compound.tag = Some(tag);
    }

    while let Some(ch) = chars.next() {
        match ch {
            '#' | '.' => {
                let mut name = String::new();
                while let Some(&next) = chars.peek() {
                    if matches!(next, '#' | '.' | '[') {
                        break;
                    }
                    name.push(next);
                    chars.next();
                }
                if name.is_empty() || !name.chars().all(is_name_char) {
                    return None;
                }
                if ch == '#' {
                    compound.id = Some(name);
                } else {
                    compound.classes.push(name);
                }
            }
            '[' => {
                let mut inner = String::new();
                for next in chars.by_ref() {
                    if next == ']' {
                        break;
                    }
                    inner.push(next);
                }
                compound.attributes.push(parse_attribute(&inner)?);
            }
            _ => return None,
        }
    }

    Some(compound)
}

fn parse_attribute(inner: &str) -> Option<AttributeSelector> {
    let (name, value) = match inner.split_once('=') {
        Some((name, value)) => {
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            (name.trim(), Some(value.to_string()))
        }
        None => (inner.trim(), None),
    };
    if name.is_empty() {
        return None;
    }
    Some(AttributeSelector {
        name: name.to_string(),
        value,
    })
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}
