// ABOUTME: Integration tests for rendering the built-in catalogs
// ABOUTME: Covers greeting, order sentence, signature rules and placeholder coverage across every template

use pretty_assertions::assert_eq;

use scriptdesk::template::{
    placeholder, CategoryKind, FieldValues, RenderContext, RenderPolicy, Sector, TemplateEngine,
    TemplateError,
};

mod common;
use common::{all_fields, logistics_context};

fn engine() -> TemplateEngine {
    TemplateEngine::builtin().expect("Built-in catalogs should load")
}

#[test]
fn test_acareacao_logistics_example() {
    let engine = engine();
    let text = engine
        .render(
            Sector::Pendencia,
            "ACAREAÇÃO",
            &FieldValues::new(),
            &logistics_context("SHOPEE"),
        )
        .unwrap();

    assert!(text.starts_with("Olá, (Nome do cliente)"));

    let (first, rest) = text.split_once('\n').unwrap();
    assert!(!first.contains("pedido de número"));
    assert!(rest.contains("pedido de número 4521..."));
    assert!(text.ends_with("Ana"));
}

#[test]
fn test_acareacao_amazon_has_no_signature() {
    let engine = engine();
    let text = engine
        .render(
            Sector::Pendencia,
            "ACAREAÇÃO",
            &FieldValues::new(),
            &logistics_context("AMAZON - EXTREMA"),
        )
        .unwrap();

    assert!(text.ends_with("Atenciosamente,\n"));
    assert!(!text.contains("Ana"));
    assert!(!text.contains("{colaborador}"));
}

#[test]
fn test_ausente_replaces_every_carrier_token() {
    let engine = engine();
    let spec = engine.catalog(Sector::Pendencia).get("AUSENTE").unwrap();
    let tokens = placeholder::count(&spec.body, "transportadora");
    assert!(tokens > 0);

    let context = RenderContext::new().with_carrier("PATRUS");
    let text = engine
        .render(Sector::Pendencia, "AUSENTE", &FieldValues::new(), &context)
        .unwrap();

    assert_eq!(text.matches("PATRUS").count(), tokens);
    assert!(!text.contains("{transportadora}"));
}

#[test]
fn test_missing_carrier_uses_dash() {
    let engine = engine();
    let text = engine
        .render(
            Sector::Pendencia,
            "AUSENTE",
            &FieldValues::new(),
            &RenderContext::new().with_carrier("   "),
        )
        .unwrap();

    assert!(text.contains("A transportadora - tentou"));
}

#[test]
fn test_register_only_categories_render_empty() {
    let engine = engine();
    let context = logistics_context("SHOPEE");

    for sector in Sector::ALL {
        let catalog = engine.catalog(sector);
        for spec in catalog.iter().filter(|s| s.kind == CategoryKind::RegisterOnly) {
            let text = engine
                .render(sector, &spec.key, &all_fields(vec!["x".to_string()]), &context)
                .unwrap();
            assert_eq!(text, "", "{} / {}", sector, spec.key);
        }
    }

    let digisac = engine
        .render(
            Sector::Pendencia,
            "ATENDIMENTO DIGISAC",
            &FieldValues::new(),
            &context,
        )
        .unwrap();
    assert_eq!(digisac, "");
}

#[test]
fn test_render_is_idempotent() {
    let engine = engine();
    let fields = FieldValues::new().with("valor_desconto", "80,00");
    let context = logistics_context("CNOVA").with_client_name("Maria");

    for sector in Sector::ALL {
        for key in engine.catalog(sector).keys() {
            let first = engine.render(sector, key, &fields, &context).unwrap();
            let second = engine.render(sector, key, &fields, &context).unwrap();
            assert_eq!(first, second);
        }
    }
}

#[test]
fn test_no_raw_tokens_when_everything_is_supplied() {
    let engine = engine();
    let context = RenderContext::new()
        .with_client_name("Maria")
        .with_order_number("123456")
        .with_carrier("JADLOG")
        .with_collaborator("Tamara")
        .with_portal("SHOPEE");

    for sector in Sector::ALL {
        for spec in engine.catalog(sector).iter() {
            let fields = all_fields(spec.fields.iter().map(|slot| slot.name.clone()));
            let text = engine.render(sector, &spec.key, &fields, &context).unwrap();

            if spec.kind == CategoryKind::RegisterOnly {
                continue;
            }
            assert!(!text.is_empty(), "{} / {} rendered empty", sector, spec.key);

            for name in placeholder::tokens(&text) {
                assert!(
                    spec.is_literal(&name),
                    "{} / {} left {{{}}} in the output",
                    sector,
                    spec.key,
                    name
                );
            }
            assert!(!text.contains("(Nome do cliente)"));
        }
    }
}

#[test]
fn test_every_builtin_token_is_covered() {
    let engine = engine();
    for sector in Sector::ALL {
        let issues = engine.catalog(sector).lint();
        assert!(issues.is_empty(), "{:?}", issues);
    }
}

#[test]
fn test_unknown_key_is_the_only_failure() {
    let engine = engine();
    let err = engine
        .render(
            Sector::Sac,
            "AUSENTE",
            &FieldValues::new(),
            &RenderContext::new(),
        )
        .unwrap_err();

    assert!(matches!(err, TemplateError::InvalidTemplateKey { .. }));
}

#[test]
fn test_exclamation_added_for_marketplace_portal() {
    let engine = engine();
    let context = RenderContext::new()
        .with_client_name("Maria")
        .with_order_number("99")
        .with_portal("CNOVA");

    let text = engine
        .render(
            Sector::Sac,
            "ENVIO DE 2° VIA NF",
            &FieldValues::new(),
            &context,
        )
        .unwrap();
    assert!(text.starts_with(
        "Olá, Maria!\n\nO atendimento é referente ao seu pedido de número 99...\n\nSegue em anexo"
    ));

    // Membership is exact
    let text = engine
        .render(
            Sector::Sac,
            "ENVIO DE 2° VIA NF",
            &FieldValues::new(),
            &context.clone().with_portal("CNOVA MARKETPLACE"),
        )
        .unwrap();
    assert!(text.starts_with("Olá, Maria\n"));
}

#[test]
fn test_existing_exclamation_is_not_doubled() {
    let engine = engine();
    let context = RenderContext::new().with_portal("PONTO");

    let text = engine
        .render(Sector::Sac, "ENVIO DE NF", &FieldValues::new(), &context)
        .unwrap();
    assert!(text.starts_with("Olá, (Nome do cliente)!\n"));
    assert!(!text.contains("!!"));
}

#[test]
fn test_heading_order_reference() {
    let engine = engine();

    let text = engine
        .render(
            Sector::Sac,
            "BARRAR ENTREGA NA TRANSPORTADORA",
            &FieldValues::new(),
            &RenderContext::new().with_order_number("555"),
        )
        .unwrap();
    assert!(text.starts_with(
        "Olá, (Nome do cliente)!\nO atendimento é referente ao seu pedido de número 555\n\nSolicitamos"
    ));

    let text = engine
        .render(
            Sector::Sac,
            "ALTERAÇÃO DE ENDEREÇO (SOLICITAÇÃO DE DADOS)",
            &FieldValues::new(),
            &RenderContext::new(),
        )
        .unwrap();
    assert!(text.contains("pedido de número ......\n\nPodemos verificar"));
}

#[test]
fn test_greeting_only_scripts_skip_order_sentence() {
    let engine = engine();
    let context = RenderContext::new()
        .with_order_number("42")
        .with_collaborator("Tamara");

    let text = engine
        .render(Sector::Sac, "SAUDAÇÃO", &FieldValues::new(), &context)
        .unwrap();
    assert!(!text.contains("pedido de número"));
    assert!(text.contains("Me chamo Tamara"));
}

#[test]
fn test_field_slots_fall_back_to_dots() {
    let engine = engine();
    let fields = FieldValues::new()
        .with("rua", "Rua das Flores")
        .with("cep", "  ");

    let text = engine
        .render(
            Sector::Sac,
            "INSUCESSO NA ENTREGA (SOLICITAR DADOS)",
            &fields,
            &RenderContext::new().with_order_number("10"),
        )
        .unwrap();

    assert!(text.contains("Rua: Rua das Flores\n"));
    assert!(text.contains("CEP: ................\n"));
    assert!(text.contains("Complemento: ................\n"));
    assert!(text.contains("pedido de número 10..."));
}

#[test]
fn test_free_text_appends_sign_off() {
    let engine = engine();
    let context = RenderContext::new()
        .with_collaborator("Tamara")
        .with_order_number("1");

    let fields = FieldValues::new().with("mensagem", "Seu reembolso foi aprovado.");
    let text = engine
        .render(Sector::Sac, "OUTROS", &fields, &context)
        .unwrap();
    assert_eq!(
        text,
        "Seu reembolso foi aprovado.\n\nEquipe de atendimento Engage Eletro.\nTamara"
    );

    let blank = FieldValues::new().with("mensagem", " ");
    let text = engine
        .render(Sector::Sac, "RECLAME AQUI", &blank, &context)
        .unwrap();
    assert_eq!(text, "");
}

#[test]
fn test_portal_token_substitution() {
    let engine = engine();

    let text = engine
        .render(
            Sector::Sac,
            "ESTOQUE FALTANTE",
            &FieldValues::new(),
            &RenderContext::new().with_portal("MAGALU"),
        )
        .unwrap();
    assert!(text.contains("a MAGALU processará"));

    let text = engine
        .render(
            Sector::Sac,
            "ESTOQUE FALTANTE",
            &FieldValues::new(),
            &RenderContext::new(),
        )
        .unwrap();
    assert!(text.contains("a ................ processará"));
}

#[test]
fn test_default_signature_rule_is_exact() {
    let engine = engine();

    for portal in ["AMAZON PRIME", "amazon - extrema", "AMAZON"] {
        let text = engine
            .render(
                Sector::Pendencia,
                "ACAREAÇÃO",
                &FieldValues::new(),
                &logistics_context(portal),
            )
            .unwrap();
        assert!(text.ends_with("Atenciosamente,\nAna"), "portal {}", portal);
    }
}

#[test]
fn test_custom_policy_signature_rule() {
    let mut policy = RenderPolicy::default();
    policy.signature_suppression = serde_yaml::from_str("match: contains\nportals: [AMAZON]").unwrap();
    let engine = TemplateEngine::new(
        scriptdesk::template::CatalogSet::builtin().unwrap(),
        policy,
    );

    let text = engine
        .render(
            Sector::Pendencia,
            "ACAREAÇÃO",
            &FieldValues::new(),
            &logistics_context("AMAZON PRIME"),
        )
        .unwrap();
    assert!(!text.contains("Ana"));
}
