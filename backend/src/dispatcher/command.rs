//! Command lexer
//!
//! One pass over the upper-cased input line produces a closed set of tagged
//! command variants, each carrying its captured fields. Dispatch then
//! happens by exhaustive matching, so prefix overlaps (`AP` vs `APE`,
//! `SS` vs `SSR`) are resolved here, in exactly one place, by checking the
//! longer keyword first.
//!
//! The lexer validates shape only (dates must exist in the calendar, counts
//! must match); business preconditions stay in the handlers.

use crate::dates::parse_ddmmm;
use crate::error::EngineError;
use crate::sim::pricing::PriceMode;
use chrono::NaiveDate;

/// Target of an XE cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelTarget {
    One(usize),
    Range(usize, usize),
    All,
}

/// One adult entry of an NM roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    pub last: String,
    pub first: String,
    pub title: Option<String>,
}

/// The closed command set.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    HelpAll,
    HelpTopic(String),
    /// JD
    DateBanner,
    /// Bare `AN` banner
    AvailabilityBare,
    Availability {
        date: NaiveDate,
        from: String,
        to: String,
        carrier: Option<String>,
    },
    Timetable {
        date: NaiveDate,
        from: String,
        to: String,
    },
    Schedule {
        date: NaiveDate,
        from: String,
        to: String,
    },
    Sell {
        line: u32,
        class: char,
        pax: u32,
    },
    Cancel(CancelTarget),
    NameAdults(Vec<NameEntry>),
    NameChild {
        last: String,
        first: String,
        age: Option<u8>,
    },
    NameInfant {
        last: String,
        first: String,
    },
    /// Raw AP line, stored as typed
    Contact(String),
    Email(String),
    Signature(String),
    Remark(String),
    Osi {
        carrier: String,
        text: String,
    },
    Ssr {
        code: String,
        carrier: String,
        text: String,
    },
    OptionReminder {
        date: Option<String>,
        text: String,
    },
    TicketTimeLimit(String),
    FormOfPayment(String),
    /// ER
    Commit,
    /// RT
    Display,
    /// IG
    Ignore,
    /// IR with optional locator
    Retrieve(Option<String>),
    /// XI
    CancelPnr,
    QueuePlace(String),
    QueueDisplay(String),
    QueueEnter(String),
    QueueNext,
    QueueLeave,
    QueueSummary,
    Price(PriceMode),
    PriceOptions {
        detailed: bool,
    },
    TstDisplay(Option<u32>),
    FareNotes(Option<usize>),
    /// ET / TTP
    TicketIssue,
    TicketVoid(Option<String>),
    /// ITR-EML
    ReceiptEmail,
    Decode(String),
    Search(String),
}

fn is_upper_alpha(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_uppercase())
}

fn is_alnum_upper(text: &str) -> bool {
    !text.is_empty()
        && text
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

fn valid_email(text: &str) -> bool {
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty() && !text.contains(char::is_whitespace)
}

/// Parse the two availability address forms shared by AN/TN/SN:
/// `ddMMM<FROM><TO>` and `<FROM><TO>/ddMMM[/<CC>]`.
fn parse_an_address(
    rest: &str,
    year: i32,
) -> Result<(NaiveDate, String, String, Option<String>), EngineError> {
    // Form A: date first, no carrier filter.
    for date_len in [5usize, 4] {
        if rest.len() == date_len + 6 {
            let (date_part, cities) = rest.split_at(date_len);
            if let Some(date) = parse_ddmmm(date_part, year) {
                if is_upper_alpha(cities) {
                    let (from, to) = cities.split_at(3);
                    return Ok((date, from.to_string(), to.to_string(), None));
                }
            }
        }
    }

    // Form B: cities first, slash-separated date, optional carrier filter.
    let mut parts = rest.split('/');
    let cities = parts.next().unwrap_or("");
    let date_part = parts.next();
    let carrier = parts.next();
    if parts.next().is_some() {
        return Err(EngineError::InvalidFormat);
    }
    if cities.len() == 6 && is_upper_alpha(cities) {
        if let Some(date) = date_part.and_then(|d| parse_ddmmm(d, year)) {
            let carrier = match carrier {
                None => None,
                Some(code) if code.len() == 2 && is_alnum_upper(code) => Some(code.to_string()),
                Some(_) => return Err(EngineError::InvalidFormat),
            };
            let (from, to) = cities.split_at(3);
            return Ok((date, from.to_string(), to.to_string(), carrier));
        }
    }

    Err(EngineError::InvalidFormat)
}

fn parse_sell(rest: &str) -> Result<Command, EngineError> {
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() || digits.len() > 2 {
        return Err(EngineError::InvalidFormat);
    }
    let after = &rest[digits.len()..];
    let mut chars = after.chars();
    let class = chars.next().ok_or(EngineError::InvalidFormat)?;
    if !class.is_ascii_uppercase() {
        return Err(EngineError::InvalidFormat);
    }
    let pax_part: &str = chars.as_str();
    let pax = if pax_part.is_empty() {
        1
    } else if pax_part.len() <= 2 && pax_part.bytes().all(|b| b.is_ascii_digit()) {
        pax_part.parse().map_err(|_| EngineError::InvalidFormat)?
    } else {
        return Err(EngineError::InvalidFormat);
    };
    let line = digits.parse().map_err(|_| EngineError::InvalidFormat)?;
    Ok(Command::Sell { line, class, pax })
}

fn parse_cancel(rest: &str) -> Result<Command, EngineError> {
    if rest == "ALL" {
        return Ok(Command::Cancel(CancelTarget::All));
    }
    if let Some((a, b)) = rest.split_once('-') {
        let a: usize = a.parse().map_err(|_| EngineError::InvalidFormat)?;
        let b: usize = b.parse().map_err(|_| EngineError::InvalidFormat)?;
        if a == 0 || b == 0 {
            return Err(EngineError::InvalidFormat);
        }
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        return Ok(Command::Cancel(CancelTarget::Range(lo, hi)));
    }
    let n: usize = rest.parse().map_err(|_| EngineError::InvalidFormat)?;
    if n == 0 {
        return Err(EngineError::InvalidFormat);
    }
    Ok(Command::Cancel(CancelTarget::One(n)))
}

fn parse_name_pair(text: &str) -> Result<(String, String), EngineError> {
    let (last, first) = text.split_once('/').ok_or(EngineError::InvalidFormat)?;
    if is_upper_alpha(last) && is_upper_alpha(first) {
        Ok((last.to_string(), first.to_string()))
    } else {
        Err(EngineError::InvalidFormat)
    }
}

fn parse_name(rest: &str) -> Result<Command, EngineError> {
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(EngineError::InvalidFormat);
    }
    let count: usize = digits.parse().map_err(|_| EngineError::InvalidFormat)?;
    if count == 0 {
        return Err(EngineError::InvalidFormat);
    }
    let body = rest[digits.len()..].trim();

    // Child / infant single-entry forms carry a parenthetical tag.
    if let Some(open) = body.find('(') {
        if count != 1 || !body.ends_with(')') {
            return Err(EngineError::InvalidFormat);
        }
        let (last, first) = parse_name_pair(body[..open].trim())?;
        let tag = &body[open + 1..body.len() - 1];
        if tag == "INF" {
            return Ok(Command::NameInfant { last, first });
        }
        if tag == "CHD" {
            return Ok(Command::NameChild {
                last,
                first,
                age: None,
            });
        }
        if let Some(age) = tag.strip_prefix("CHD/") {
            if age.len() <= 2 && !age.is_empty() {
                let age = age.parse().map_err(|_| EngineError::InvalidFormat)?;
                return Ok(Command::NameChild {
                    last,
                    first,
                    age: Some(age),
                });
            }
        }
        return Err(EngineError::InvalidFormat);
    }

    // Adult roster: `LAST/FIRST [MR|MRS]` entries separated by spaces.
    let mut entries: Vec<NameEntry> = Vec::new();
    for token in body.split_whitespace() {
        if token == "MR" || token == "MRS" {
            let entry = entries.last_mut().ok_or(EngineError::InvalidFormat)?;
            if entry.title.is_some() {
                return Err(EngineError::InvalidFormat);
            }
            entry.title = Some(token.to_string());
        } else {
            let (last, first) = parse_name_pair(token)?;
            entries.push(NameEntry {
                last,
                first,
                title: None,
            });
        }
    }
    if entries.len() != count {
        return Err(EngineError::InvalidFormat);
    }
    Ok(Command::NameAdults(entries))
}

fn parse_queue_name(rest: &str) -> Result<String, EngineError> {
    let name = rest.strip_prefix('/').ok_or(EngineError::InvalidFormat)?;
    if is_alnum_upper(name) {
        Ok(name.to_string())
    } else {
        Err(EngineError::InvalidFormat)
    }
}

fn parse_numeric_suffix<T: std::str::FromStr>(rest: &str) -> Result<Option<T>, EngineError> {
    if rest.is_empty() {
        return Ok(None);
    }
    rest.parse()
        .map(Some)
        .map_err(|_| EngineError::InvalidFormat)
}

/// Lex one trimmed, upper-cased, non-empty command line.
pub fn parse(input: &str, year: i32) -> Result<Command, EngineError> {
    // Fixed words first.
    match input {
        "HELP" | "HE" => return Ok(Command::HelpAll),
        "JD" => return Ok(Command::DateBanner),
        "AN" => return Ok(Command::AvailabilityBare),
        "ER" => return Ok(Command::Commit),
        "RT" => return Ok(Command::Display),
        "IG" => return Ok(Command::Ignore),
        "XI" => return Ok(Command::CancelPnr),
        "QN" => return Ok(Command::QueueNext),
        "QR" => return Ok(Command::QueueLeave),
        "QS" => return Ok(Command::QueueSummary),
        "ET" | "TTP" => return Ok(Command::TicketIssue),
        "ITR-EML" => return Ok(Command::ReceiptEmail),
        "FXP" => return Ok(Command::Price(PriceMode::Store)),
        "FXR" => return Ok(Command::Price(PriceMode::Quote)),
        "FXX" => return Ok(Command::Price(PriceMode::Rebook)),
        "FXB" => return Ok(Command::Price(PriceMode::BestBuy)),
        "FXL" => return Ok(Command::PriceOptions { detailed: false }),
        "VOID" => return Ok(Command::TicketVoid(None)),
        "IR" => return Ok(Command::Retrieve(None)),
        _ => {}
    }

    if let Some(topic) = input.strip_prefix("HELP ").or_else(|| input.strip_prefix("HE ")) {
        return Ok(Command::HelpTopic(topic.trim().to_string()));
    }

    if let Some(rest) = input.strip_prefix("DAC") {
        let code = rest.trim();
        if code.len() == 3 && is_upper_alpha(code) {
            return Ok(Command::Decode(code.to_string()));
        }
        return Err(EngineError::InvalidFormat);
    }

    if let Some(rest) = input.strip_prefix("DAN") {
        let text = rest.trim();
        if text.is_empty() {
            return Err(EngineError::InvalidFormat);
        }
        return Ok(Command::Search(text.to_string()));
    }

    if let Some(rest) = input.strip_prefix("VOID ") {
        let token = rest.trim();
        if token.is_empty() {
            return Err(EngineError::InvalidFormat);
        }
        return Ok(Command::TicketVoid(Some(token.to_string())));
    }

    if let Some(rest) = input.strip_prefix("IR") {
        let locator = rest.trim();
        if crate::store::is_locator_shaped(locator) {
            return Ok(Command::Retrieve(Some(locator.to_string())));
        }
        return Err(EngineError::InvalidFormat);
    }

    if let Some(rest) = input.strip_prefix("TQT") {
        return Ok(Command::TstDisplay(parse_numeric_suffix(rest.trim())?));
    }

    if let Some(rest) = input.strip_prefix("FQN") {
        return Ok(Command::FareNotes(parse_numeric_suffix(rest.trim())?));
    }

    if let Some(rest) = input.strip_prefix("FXL") {
        if !rest.is_empty() {
            return Ok(Command::PriceOptions { detailed: true });
        }
    }

    if let Some(rest) = input.strip_prefix("TKTL") {
        let date_part = rest.strip_prefix('/').unwrap_or(rest);
        if let Some(date) = parse_ddmmm(date_part, year) {
            return Ok(Command::TicketTimeLimit(crate::dates::format_ddmmm(date)));
        }
        return Err(EngineError::InvalidFormat);
    }

    if let Some(rest) = input.strip_prefix("TN") {
        let (date, from, to, _) = parse_an_address(rest, year)?;
        return Ok(Command::Timetable { date, from, to });
    }

    // SSR before SS and SN.
    if let Some(rest) = input.strip_prefix("SSR ") {
        let mut tokens = rest.split_whitespace();
        let code = tokens.next().unwrap_or("");
        let carrier = tokens.next().unwrap_or("");
        let text = tokens.collect::<Vec<_>>().join(" ");
        if (2..=4).contains(&code.len())
            && is_alnum_upper(code)
            && carrier.len() == 2
            && is_alnum_upper(carrier)
            && !text.is_empty()
        {
            return Ok(Command::Ssr {
                code: code.to_string(),
                carrier: carrier.to_string(),
                text,
            });
        }
        return Err(EngineError::InvalidFormat);
    }

    if let Some(rest) = input.strip_prefix("SN") {
        let (date, from, to, _) = parse_an_address(rest, year)?;
        return Ok(Command::Schedule { date, from, to });
    }

    if let Some(rest) = input.strip_prefix("SS") {
        return parse_sell(rest);
    }

    if let Some(rest) = input.strip_prefix("XE") {
        return parse_cancel(rest);
    }

    if let Some(rest) = input.strip_prefix("NM") {
        return parse_name(rest);
    }

    // APE before AP.
    if let Some(rest) = input.strip_prefix("APE-") {
        let email = rest.trim();
        if valid_email(email) {
            return Ok(Command::Email(email.to_string()));
        }
        return Err(EngineError::InvalidFormat);
    }

    if let Some(rest) = input.strip_prefix("AP") {
        if rest.trim().is_empty() {
            return Err(EngineError::InvalidFormat);
        }
        return Ok(Command::Contact(input.to_string()));
    }

    if let Some(rest) = input.strip_prefix("RF") {
        if rest.starts_with('+') {
            return Err(EngineError::InvalidFormat);
        }
        let text = rest.trim();
        if text.is_empty() {
            return Err(EngineError::InvalidFormat);
        }
        return Ok(Command::Signature(text.to_string()));
    }

    if let Some(rest) = input.strip_prefix("RM") {
        let text = rest.trim();
        if text.is_empty() {
            return Err(EngineError::InvalidFormat);
        }
        return Ok(Command::Remark(text.to_string()));
    }

    if let Some(rest) = input.strip_prefix("OSI ") {
        let mut tokens = rest.split_whitespace();
        let carrier = tokens.next().unwrap_or("");
        let text = tokens.collect::<Vec<_>>().join(" ");
        if carrier.len() == 2 && is_alnum_upper(carrier) && !text.is_empty() {
            return Ok(Command::Osi {
                carrier: carrier.to_string(),
                text,
            });
        }
        return Err(EngineError::InvalidFormat);
    }

    if let Some(rest) = input.strip_prefix("OP") {
        if let Some(text) = rest.strip_prefix('/') {
            let text = text.trim();
            if text.is_empty() {
                return Err(EngineError::InvalidFormat);
            }
            return Ok(Command::OptionReminder {
                date: None,
                text: text.to_string(),
            });
        }
        let (date_part, text) = rest.split_once('/').ok_or(EngineError::InvalidFormat)?;
        let date = parse_ddmmm(date_part, year).ok_or(EngineError::InvalidFormat)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(EngineError::InvalidFormat);
        }
        return Ok(Command::OptionReminder {
            date: Some(crate::dates::format_ddmmm(date)),
            text: text.to_string(),
        });
    }

    if let Some(rest) = input.strip_prefix("FP") {
        let text = rest.trim();
        if text == "CASH" || (text.starts_with("CC") && text.len() > 2) {
            return Ok(Command::FormOfPayment(text.to_string()));
        }
        return Err(EngineError::InvalidFormat);
    }

    if let Some(rest) = input.strip_prefix("QP") {
        return Ok(Command::QueuePlace(parse_queue_name(rest)?));
    }
    if let Some(rest) = input.strip_prefix("QD") {
        return Ok(Command::QueueDisplay(parse_queue_name(rest)?));
    }
    if let Some(rest) = input.strip_prefix("QE") {
        return Ok(Command::QueueEnter(parse_queue_name(rest)?));
    }

    if let Some(rest) = input.strip_prefix("AN") {
        let (date, from, to, carrier) = parse_an_address(rest, year)?;
        return Ok(Command::Availability {
            date,
            from,
            to,
            carrier,
        });
    }

    Err(EngineError::InvalidFormat)
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: i32 = 2030;

    fn parse_ok(input: &str) -> Command {
        parse(input, YEAR).expect(input)
    }

    fn parse_err(input: &str) {
        assert_eq!(parse(input, YEAR), Err(EngineError::InvalidFormat), "{}", input);
    }

    #[test]
    fn test_availability_forms() {
        let a = parse_ok("AN26DECALGPAR");
        let b = parse_ok("ANALGPAR/26DEC");
        match (&a, &b) {
            (
                Command::Availability { date: da, from: fa, to: ta, carrier: None },
                Command::Availability { date: db, from: fb, to: tb, carrier: None },
            ) => {
                assert_eq!(da, db);
                assert_eq!((fa.as_str(), ta.as_str()), ("ALG", "PAR"));
                assert_eq!((fb.as_str(), tb.as_str()), ("ALG", "PAR"));
            }
            other => panic!("unexpected: {:?}", other),
        }

        match parse_ok("ANALGPAR/26DEC/PC") {
            Command::Availability { carrier: Some(c), .. } => assert_eq!(c, "PC"),
            other => panic!("unexpected: {:?}", other),
        }

        parse_err("ANXYZ");
        parse_err("AN31FEBALGPAR");
    }

    #[test]
    fn test_sell_forms() {
        assert_eq!(
            parse_ok("SS1Y1"),
            Command::Sell { line: 1, class: 'Y', pax: 1 }
        );
        assert_eq!(
            parse_ok("SS2M2"),
            Command::Sell { line: 2, class: 'M', pax: 2 }
        );
        assert_eq!(
            parse_ok("SS1Y"),
            Command::Sell { line: 1, class: 'Y', pax: 1 }
        );
        parse_err("SSY1");
    }

    #[test]
    fn test_cancel_forms() {
        assert_eq!(parse_ok("XE1"), Command::Cancel(CancelTarget::One(1)));
        assert_eq!(parse_ok("XE3-1"), Command::Cancel(CancelTarget::Range(1, 3)));
        assert_eq!(parse_ok("XEALL"), Command::Cancel(CancelTarget::All));
        parse_err("XE0");
        parse_err("XEFOO");
    }

    #[test]
    fn test_name_forms() {
        match parse_ok("NM1DOE/JOHN MR") {
            Command::NameAdults(entries) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].last, "DOE");
                assert_eq!(entries[0].title.as_deref(), Some("MR"));
            }
            other => panic!("unexpected: {:?}", other),
        }

        match parse_ok("NM2DOE/JOHN MR SMITH/ANNA MRS") {
            Command::NameAdults(entries) => assert_eq!(entries.len(), 2),
            other => panic!("unexpected: {:?}", other),
        }

        assert_eq!(
            parse_ok("NM1DOE/JIM (CHD/10)"),
            Command::NameChild {
                last: "DOE".to_string(),
                first: "JIM".to_string(),
                age: Some(10),
            }
        );
        assert_eq!(
            parse_ok("NM1DOE/JANE (INF)"),
            Command::NameInfant {
                last: "DOE".to_string(),
                first: "JANE".to_string(),
            }
        );

        parse_err("NM1DOE");
        parse_err("NM2DOE/JOHN MR");
        parse_err("NM1DOE/JIM (CHD/ABC)");
    }

    #[test]
    fn test_contact_email_signature() {
        assert_eq!(parse_ok("AP123456"), Command::Contact("AP123456".to_string()));
        assert_eq!(
            parse_ok("APE-JOHN.DOE@EXAMPLE.COM"),
            Command::Email("JOHN.DOE@EXAMPLE.COM".to_string())
        );
        parse_err("APE-NOPE");
        parse_err("AP");

        assert_eq!(parse_ok("RFTEST"), Command::Signature("TEST".to_string()));
        parse_err("RF+X");
        parse_err("RF");
    }

    #[test]
    fn test_service_elements() {
        assert_eq!(
            parse_ok("RMTEST REMARK"),
            Command::Remark("TEST REMARK".to_string())
        );
        assert_eq!(
            parse_ok("OSI YY TEST MESSAGE"),
            Command::Osi {
                carrier: "YY".to_string(),
                text: "TEST MESSAGE".to_string(),
            }
        );
        match parse_ok("SSR DOCS YY HK1/P/FR") {
            Command::Ssr { code, carrier, text } => {
                assert_eq!(code, "DOCS");
                assert_eq!(carrier, "YY");
                assert_eq!(text, "HK1/P/FR");
            }
            other => panic!("unexpected: {:?}", other),
        }
        parse_err("SSR DOCS YY");

        assert_eq!(
            parse_ok("OP26DEC/CALL CLIENT"),
            Command::OptionReminder {
                date: Some("26DEC".to_string()),
                text: "CALL CLIENT".to_string(),
            }
        );
        parse_err("OP31FEB/CALL");

        assert_eq!(
            parse_ok("TKTL26DEC"),
            Command::TicketTimeLimit("26DEC".to_string())
        );
        assert_eq!(
            parse_ok("TKTL/26DEC"),
            Command::TicketTimeLimit("26DEC".to_string())
        );
        parse_err("TKTL31FEB");

        assert_eq!(parse_ok("FP CASH"), Command::FormOfPayment("CASH".to_string()));
        parse_err("FP MAYBE");
    }

    #[test]
    fn test_lifecycle_and_queue_words() {
        assert_eq!(parse_ok("ER"), Command::Commit);
        assert_eq!(parse_ok("IG"), Command::Ignore);
        assert_eq!(parse_ok("IR"), Command::Retrieve(None));
        assert_eq!(
            parse_ok("IR ABCDEF"),
            Command::Retrieve(Some("ABCDEF".to_string()))
        );
        parse_err("IR123");

        assert_eq!(parse_ok("QP/12C1"), Command::QueuePlace("12C1".to_string()));
        parse_err("QP/");
        assert_eq!(parse_ok("QN"), Command::QueueNext);
    }

    #[test]
    fn test_pricing_and_ticketing_words() {
        assert_eq!(parse_ok("FXP"), Command::Price(PriceMode::Store));
        assert_eq!(parse_ok("FXB"), Command::Price(PriceMode::BestBuy));
        assert_eq!(parse_ok("FXL"), Command::PriceOptions { detailed: false });
        assert_eq!(parse_ok("FXL1"), Command::PriceOptions { detailed: true });
        assert_eq!(parse_ok("TQT"), Command::TstDisplay(None));
        assert_eq!(parse_ok("TQT2"), Command::TstDisplay(Some(2)));
        assert_eq!(parse_ok("ET"), Command::TicketIssue);
        assert_eq!(parse_ok("TTP"), Command::TicketIssue);
        assert_eq!(
            parse_ok("VOID 172-0000000001"),
            Command::TicketVoid(Some("172-0000000001".to_string()))
        );
        assert_eq!(parse_ok("ITR-EML"), Command::ReceiptEmail);
    }

    #[test]
    fn test_prefix_overlaps_resolve_to_longest() {
        // SSR vs SS, APE vs AP, SN vs SSR.
        assert!(matches!(parse_ok("SSR DOCS YY X"), Command::Ssr { .. }));
        assert!(matches!(parse_ok("SS1Y1"), Command::Sell { .. }));
        assert!(matches!(parse_ok("SN26DECALGPAR"), Command::Schedule { .. }));
        assert!(matches!(parse_ok("APE-A@B.CO"), Command::Email(_)));
        assert!(matches!(parse_ok("AP555"), Command::Contact(_)));
    }

    #[test]
    fn test_unknown_is_invalid() {
        parse_err("ZZTOP");
        parse_err("SNBADINPUT");
        parse_err("TN31FEBALGPAR");
    }
}
