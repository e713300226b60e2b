//! Scopes command - show what each access level asks GitHub for

use devhub_shared::login::LoginOption;
use devhub_shared::oauth::LoginMethod;

pub fn handle_scopes(access: Option<LoginMethod>) {
    let methods: Vec<LoginMethod> = match access {
        Some(method) => vec![method],
        None => LoginMethod::ALL.to_vec(),
    };

    for method in methods {
        let option = LoginOption::for_method(method, false);
        println!("{} ({})", option.subtitle, method.id());
        println!("  {}", method.permission_scopes().join(", "));
    }
}
