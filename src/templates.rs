use handlebars::Handlebars;
use std::sync::Arc;

pub type Hbs = Arc<Handlebars<'static>>;

const TEMPLATE_DIR: &str = "templates";

// name => path under templates/
const TEMPLATES: &[(&str, &str)] = &[
    ("layouts/base", "layouts/base.hbs"),
    ("pages/home", "pages/home.hbs"),
    ("pages/not_found", "pages/not_found.hbs"),
    ("pages/login", "pages/login.hbs"),
    ("pages/register", "pages/register.hbs"),
    ("pages/auth_error", "pages/auth_error.hbs"),
    ("pages/beneficiaries", "pages/beneficiaries.hbs"),
    ("pages/checkout", "pages/checkout.hbs"),
    ("partials/beneficiary_form", "partials/beneficiary_form.hbs"),
    ("partials/beneficiary_list", "partials/beneficiary_list.hbs"),
    ("partials/market_table", "partials/market_table.hbs"),
    ("partials/news_list", "partials/news_list.hbs"),
];

const PARTIALS: &[(&str, &str)] = &[
    ("navbar", "partials/navbar.hbs"),
    ("footer", "partials/footer.hbs"),
];

pub fn build_handlebars() -> Hbs {
    let mut hb = Handlebars::new();

    for (name, file) in TEMPLATES {
        let path = format!("{TEMPLATE_DIR}/{file}");
        hb.register_template_file(name, &path)
            .unwrap_or_else(|e| panic!("template {name}: {e}"));
    }

    for (name, file) in PARTIALS {
        let path = format!("{TEMPLATE_DIR}/{file}");
        let src = std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("partial {path}: {e}"));
        hb.register_partial(name, src)
            .unwrap_or_else(|e| panic!("register partial {name}: {e}"));
    }

    Arc::new(hb)
}
