//! Canned provider documents and configuration.

/// Central bank daily feed with USD at `usd` (nominal 1) and CNY quoted per 10.
pub fn cbr_daily(usd: &str, cny_per_ten: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ValCurs Date="18.10.2026" name="Foreign Currency Market">
  <Valute ID="R01235">
    <NumCode>840</NumCode>
    <CharCode>USD</CharCode>
    <Nominal>1</Nominal>
    <Name>US Dollar</Name>
    <Value>{usd}</Value>
  </Valute>
  <Valute ID="R01375">
    <NumCode>156</NumCode>
    <CharCode>CNY</CharCode>
    <Nominal>10</Nominal>
    <Name>Yuan Renminbi</Name>
    <Value>{cny_per_ten}</Value>
  </Valute>
</ValCurs>"#
    )
}

/// Investing-style quote page.
pub fn investing_page(price: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>Quote</title></head><body>
  <div class="instrument-header">
    <div data-test="instrument-price-last">{price}</div>
    <span data-test="instrument-price-change">+0.12</span>
  </div>
</body></html>"#
    )
}

/// Investing page after a redesign: only the legacy id survives.
pub fn investing_legacy_page(price: &str) -> String {
    format!(r#"<html><body><span id="last_last">{price}</span></body></html>"#)
}

/// Profinance-style chart page.
pub fn profinance_page(price: &str) -> String {
    format!(
        r#"<html><body><div class="quote"><span class="price">{price}</span></div></body></html>"#
    )
}

/// Configuration pointing every provider at a loopback server.
pub fn loopback_config(base_url: &str, extra: &str) -> String {
    format!(
        r#"[logging]
level = "warn"

[fetch]
timeout_secs = 2
connect_timeout_secs = 1

[sources.central_bank]
url = "{base_url}/scripts/XML_daily.asp"

[sources.investing]
url_template = "{base_url}/currencies/{{base}}-{{quote}}"

[sources.profinance]
url_template = "{base_url}/chart/{{base}}{{quote}}/"

{extra}
"#
    )
}
