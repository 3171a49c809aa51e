//! HTML pages rendered with maud
//!
//! All dynamic content is escaped by maud. Pages share a layout with a nav
//! that reflects the login state.

use maud::{html, Markup, DOCTYPE};

use crate::model::{Link, User};

/// Shared page shell: header, nav, and the page content
fn layout(title: &str, user_email: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) " - TinyLinks" }
            }
            body {
                header {
                    h1 { a href="/" { "TinyLinks" } }
                    nav {
                        @if let Some(email) = user_email {
                            span { "Logged in as " b { (email) } }
                            " "
                            a href="/urls" { "My links" }
                            " "
                            a href="/urls/new" { "New link" }
                            form method="post" action="/logout" {
                                button type="submit" { "Log out" }
                            }
                        } @else {
                            a href="/login" { "Log in" }
                            " "
                            a href="/register" { "Register" }
                        }
                    }
                    hr;
                }
                main { (content) }
            }
        }
    }
}

/// Inline list of validation or authentication errors
fn error_list(errors: &[String]) -> Markup {
    html! {
        @if !errors.is_empty() {
            ul class="errors" {
                @for error in errors {
                    li { (error) }
                }
            }
        }
    }
}

/// Landing page for logged-out browsers
pub fn welcome_page() -> Markup {
    layout(
        "Welcome",
        None,
        html! {
            h2 { "Welcome to the link shortener" }
            p { "Register or log in to create and manage short links." }
        },
    )
}

/// Table of the current user's links
pub fn urls_index(user: &User, links: &[Link]) -> Markup {
    layout(
        "My links",
        Some(&user.email),
        html! {
            h2 { "My links" }
            @if links.is_empty() {
                p { "No links yet. " a href="/urls/new" { "Create one." } }
            } @else {
                table {
                    thead {
                        tr {
                            th { "Short code" }
                            th { "Long URL" }
                            th { "Visits" }
                            th { "Actions" }
                        }
                    }
                    tbody {
                        @for link in links {
                            tr {
                                td { a href={ "/u/" (link.code) } { (link.code) } }
                                td { (link.long_url) }
                                td { (link.visits.len()) }
                                td {
                                    a href={ "/urls/" (link.code) } { "Edit" }
                                    form method="post" action={ "/urls/" (link.code) "/delete" } {
                                        button type="submit" { "Delete" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

/// Form for creating a new link
pub fn urls_new(user: &User, errors: &[String], long_url: &str) -> Markup {
    layout(
        "New link",
        Some(&user.email),
        html! {
            h2 { "Shorten a URL" }
            (error_list(errors))
            form method="post" action="/urls" {
                label for="long_url" { "Long URL:" }
                " "
                input type="text" id="long_url" name="long_url" value=(long_url) placeholder="https://example.com";
                " "
                button type="submit" { "Shorten" }
            }
        },
    )
}

/// Detail page for one link: edit form and visit log
pub fn urls_show(user: &User, link: &Link, errors: &[String]) -> Markup {
    layout(
        &format!("Link {}", link.code),
        Some(&user.email),
        html! {
            h2 { "Short link " (link.code) }
            p {
                "Short URL: " a href={ "/u/" (link.code) } { "/u/" (link.code) }
            }
            p { "Long URL: " (link.long_url) }
            p { "Created: " (link.created_at.format("%Y-%m-%d %H:%M UTC")) }

            h3 { "Edit" }
            (error_list(errors))
            form method="post" action={ "/urls/" (link.code) } {
                label for="long_url" { "New long URL:" }
                " "
                input type="text" id="long_url" name="long_url" value=(link.long_url);
                " "
                button type="submit" { "Update" }
            }

            h3 { "Visits" }
            p { "Total visits: " (link.visits.len()) }
            @if !link.visits.is_empty() {
                table {
                    thead {
                        tr {
                            th { "When" }
                            th { "Visitor" }
                        }
                    }
                    tbody {
                        @for visit in &link.visits {
                            tr {
                                td { (visit.visited_at.format("%Y-%m-%d %H:%M:%S UTC")) }
                                td { (visit.visitor_id) }
                            }
                        }
                    }
                }
            }
        },
    )
}

/// Login form, optionally re-rendered with errors after a failed attempt
pub fn login_page(errors: &[String], email: &str) -> Markup {
    layout(
        "Log in",
        None,
        html! {
            h2 { "Log in" }
            (error_list(errors))
            form method="post" action="/login" {
                label for="email" { "Email:" }
                " "
                input type="email" id="email" name="email" value=(email);
                br;
                label for="password" { "Password:" }
                " "
                input type="password" id="password" name="password";
                br;
                button type="submit" { "Log in" }
            }
            p { "No account? " a href="/register" { "Register" } }
        },
    )
}

/// Registration form, optionally re-rendered with errors
pub fn register_page(errors: &[String], email: &str) -> Markup {
    layout(
        "Register",
        None,
        html! {
            h2 { "Register" }
            (error_list(errors))
            form method="post" action="/register" {
                label for="email" { "Email:" }
                " "
                input type="email" id="email" name="email" value=(email);
                br;
                label for="password" { "Password:" }
                " "
                input type="password" id="password" name="password";
                br;
                button type="submit" { "Register" }
            }
            p { "Already registered? " a href="/login" { "Log in" } }
        },
    )
}

/// 403 page for ownership violations
pub fn forbidden_page(message: &str) -> Markup {
    layout(
        "Forbidden",
        None,
        html! {
            h2 { "Forbidden" }
            p { (message) }
            p { a href="/urls" { "Back to my links" } }
        },
    )
}

/// 404 page for unknown short codes
pub fn not_found_page(code: &str) -> Markup {
    layout(
        "Not found",
        None,
        html! {
            h2 { "Not found" }
            p { "No link with code " b { (code) } " exists." }
            p { a href="/urls" { "Back to my links" } }
        },
    )
}
