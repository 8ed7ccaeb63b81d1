//! 样式应用 - 把登记表中的规则合并到匹配的控件上

use crate::native::Toolkit;
use crate::registry::StyleRegistry;

/// 按插入顺序应用全部规则，返回（规则, 控件）合并次数
///
/// 选择器匹配交给工具包；没有匹配的规则直接跳过。
/// 后应用的规则覆盖同名属性，因此重复应用同一组规则结果不变。
pub fn apply_styles<T: Toolkit>(toolkit: &mut T, registry: &StyleRegistry) -> usize {
    let mut applied = 0;

    for rule in registry.all() {
        let widgets = toolkit.query_selector_all(&rule.selector);
        log::debug!("{:?} matched {} widgets", rule.selector, widgets.len());

        for widget in &widgets {
            toolkit.merge_style(widget, &rule.properties);
        }
        applied += widgets.len();
    }

    applied
}
