//! 金额格式化

/// 最小货币单位整数 → `¥1,360`
pub fn format_jpy(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-¥{}", grouped)
    } else {
        format!("¥{}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_jpy() {
        assert_eq!(format_jpy(0), "¥0");
        assert_eq!(format_jpy(420), "¥420");
        assert_eq!(format_jpy(1360), "¥1,360");
        assert_eq!(format_jpy(1234567), "¥1,234,567");
        assert_eq!(format_jpy(-5000), "-¥5,000");
    }
}
