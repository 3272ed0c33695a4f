//! End-to-end quote flow: rate table -> pricing -> history -> approval -> ticket.

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;

use cotizador::history::{InMemoryHistory, JsonFileHistory, QuoteHistory};
use cotizador::pricing::requests::{CalcMethod, QuoteInput};
use cotizador::pricing::units::LengthUnit;
use cotizador::pricing::{format_money, price_quote};
use cotizador::workflow::{
    next_quote_number, next_ticket_number, quote_stats, ticket_stats, NewTicket, Quote,
    QuoteStatus, Role, Ticket, TicketPriority, TicketStatus, TicketUpdate,
};
use cotizador::{Catalog, QuoteCommand};

const TABLE: &str = "\u{FEFF}TIPO DE SERVICIO;CATEGORIA;ESPESOR;MILIMETRO O CALIBRE;PRECIO BASE EN PIE2;CON LUZ;TAMAÑO MINIMO EN PIE2;INSTALACION INCLUIDA;CONDICIONAL
LETRAS RECORTADAS;PVC;5MM;5;$ 15,00;NO;1,5;NO;
LETRAS FORMADAS;ACRILICO;4.5MM;4.5;$ 40,00;SI;1,5;SI;SI EL AREA ES ≤ A 3 PIE2 REDONDIAR EL TOTAL DEL CALCULO 50,00
LETRAS FORMADAS;ALUCOBOND (ACM) CON LUZ;3MM;3;$ 40,00;SI;1,5;SI;SI ES MAYOR A 3 PIE2 SUMAR UNA ESTRUCTURA INTERNA REFORZADA EQUIVALENTE A UN 10%
";

fn input_for(catalog: &Catalog, service_type: &str, category: &str) -> QuoteInput {
    QuoteInput {
        service: Some(catalog.find(service_type, category, None).unwrap().clone()),
        ..Default::default()
    }
}

#[test]
fn test_small_lit_letters_round_to_flat_price() {
    let catalog = Catalog::parse(TABLE).unwrap();
    let mut history = InMemoryHistory::new();

    let mut input = input_for(&catalog, "LETRAS FORMADAS", "ACRILICO");
    input.height = Some(dec!(30));
    input.width = Some(dec!(12));
    input.unit = LengthUnit::In;
    input.apply_tax = true;

    let priced = price_quote(input, &mut history, Utc::now()).unwrap();

    assert_eq!(priced.result.total_area, dec!(2.5));
    assert_eq!(priced.result.base_price, dec!(50.00));
    assert_eq!(priced.result.tax, dec!(3.50));
    assert_eq!(format_money(priced.result.total), "B/. 53.50");

    let led = priced.result.info.led_costs.unwrap();
    assert_eq!(led.transformer_count, 1);
}

#[test]
fn test_acm_letters_get_reinforcement_surcharge() {
    let catalog = Catalog::parse(TABLE).unwrap();
    let mut history = InMemoryHistory::new();

    let mut input = input_for(&catalog, "LETRAS FORMADAS", "ALUCOBOND (ACM) CON LUZ");
    input.height = Some(dec!(1));
    input.width = Some(dec!(1));
    input.method = CalcMethod::ByLetterCount;
    input.letter_count = Some(5);

    let priced = price_quote(input, &mut history, Utc::now()).unwrap();

    assert_eq!(priced.result.total_area, dec!(5));
    assert_eq!(priced.result.base_price, dec!(220.00));
    assert!(priced.result.info.is_reinforced_aluminum);
    assert_eq!(priced.result.total, dec!(220.00));
}

#[test]
fn test_priced_quote_through_approval_to_ticket() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::parse(TABLE).unwrap();
    let mut history = JsonFileHistory::new(dir.path().join("historial.json"), 50);
    let now = Utc.with_ymd_and_hms(2025, 9, 15, 14, 0, 0).unwrap();

    let mut input = input_for(&catalog, "LETRAS RECORTADAS", "PVC");
    input.height = Some(dec!(1));
    input.width = Some(dec!(2));
    input.custom_color = true;
    input.apply_tax = true;

    let priced = price_quote(input, &mut history, now).unwrap();
    // 15 * 2 + 2 * 2 = 34; 34 * 1.07 = 36.38
    assert_eq!(priced.result.subtotal, dec!(34));
    assert_eq!(priced.result.total, dec!(36.38));
    assert_eq!(history.entries().unwrap().len(), 1);

    let mut quote = Quote::from_result(
        next_quote_number(2025, Some("COT-2025-0007")),
        12,
        2,
        &priced.request,
        &priced.result,
        now,
    );
    assert_eq!(quote.number, "COT-2025-0008");

    quote.change_status(QuoteStatus::Sent, Role::Seller, now).unwrap();
    assert!(quote
        .change_status(QuoteStatus::Approved, Role::Seller, now)
        .is_err());
    quote.change_status(QuoteStatus::Approved, Role::Admin, now).unwrap();

    let mut ticket = Ticket::from_quote(
        &mut quote,
        NewTicket {
            number: next_ticket_number(2025, None),
            department_id: 1,
            assignee_id: None,
            created_by: 2,
            work: "Cut PVC letters, custom color".to_string(),
            priority: TicketPriority::Normal,
            delivery_date: None,
            notes: None,
        },
        now,
    )
    .unwrap();

    assert_eq!(ticket.number, "000001-2025");
    assert_eq!(ticket.quote.as_ref().unwrap().total, dec!(36.38));
    assert_eq!(quote.status, QuoteStatus::InProduction);

    ticket.update(
        TicketUpdate {
            assignee_id: Some(Some(5)),
            priority: Some(TicketPriority::Emergency),
            status: Some(TicketStatus::InProgress),
            ..Default::default()
        },
        1,
        now,
    );
    ticket.add_comment(5, "Paint mixed", now).unwrap();
    assert_eq!(ticket.activity.len(), 3);

    let quotes = quote_stats(std::slice::from_ref(&quote), None, None);
    assert_eq!(quotes.total, dec!(36.38));
    assert_eq!(quotes.by_status[0].status, QuoteStatus::InProduction);

    let tickets = ticket_stats(std::slice::from_ref(&ticket), Some(1));
    assert_eq!(tickets.in_progress, 1);
    assert_eq!(tickets.emergency, 1);
}

#[test]
fn test_command_json_through_catalog() {
    let catalog = Catalog::parse(TABLE).unwrap();
    let mut history = InMemoryHistory::new();

    let input = QuoteCommand::from_json(
        r#"{"service_type": "LETRAS FORMADAS", "category": "ACRILICO",
            "height": 30, "width": 12, "unit": "in", "apply_tax": true}"#,
    )
    .unwrap()
    .into_input(&catalog);

    let priced = price_quote(input, &mut history, Utc::now()).unwrap();
    assert_eq!(format_money(priced.result.total), "B/. 53.50");
}

#[test]
fn test_oversized_command_is_rejected() {
    let catalog = Catalog::parse(TABLE).unwrap();
    let mut history = InMemoryHistory::new();

    let input = QuoteCommand::from_json(
        r#"{"service_type": "LETRAS FORMADAS", "category": "ACRILICO",
            "height": 100000000000000, "width": 100000000000000, "unit": "m"}"#,
    )
    .unwrap()
    .into_input(&catalog);

    let err = price_quote(input, &mut history, Utc::now()).unwrap_err();
    assert!(err.to_string().contains("Height must be at most 99999999.99"));
    assert!(history.is_empty());
}

#[test]
fn test_invalid_form_is_not_recorded() {
    let mut history = InMemoryHistory::new();
    let err = price_quote(QuoteInput::default(), &mut history, Utc::now()).unwrap_err();

    assert!(err.to_string().contains("A service must be selected"));
    assert!(history.is_empty());
}
