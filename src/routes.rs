//! Route registry: every API operation and the URL template it is served on.
//!
//! Templates carry `:name` placeholders (`:idx`, `:id`, `:site_id`, `:c_lang`,
//! `:parent_id`, `:limit`, `:follow`). Rendering substitutes the values it is
//! given and leaves any other placeholder in the path untouched.

use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Which API surface serves an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Audience {
    User,
    Console,
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Audience::User => f.pad("user"),
            Audience::Console => f.pad("console"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }

    /// Reads are gated by an `enabled` flag, writes run when invoked.
    pub fn is_read(self) -> bool {
        matches!(self, HttpMethod::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        };
        f.pad(s)
    }
}

/// Audience, verb and path template of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub audience: Audience,
    pub method: HttpMethod,
    pub template: &'static str,
}

impl Route {
    const fn new(audience: Audience, method: HttpMethod, template: &'static str) -> Self {
        Self {
            audience,
            method,
            template,
        }
    }

    /// Placeholder names in template order, without the leading `:`.
    pub fn placeholders(&self) -> Vec<&'static str> {
        placeholder_regex()
            .captures_iter(self.template)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect()
    }

    pub fn render(&self, params: &PathParams) -> String {
        render_template(self.template, params)
    }
}

macro_rules! operations {
    ($( $variant:ident => $name:literal, $audience:ident, $method:ident, $template:literal; )+) => {
        /// A logical API operation.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Operation {
            $( $variant, )+
        }

        impl Operation {
            pub const ALL: &'static [Operation] = &[ $( Operation::$variant, )+ ];

            pub fn route(self) -> Route {
                match self {
                    $( Operation::$variant => Route::new(Audience::$audience, HttpMethod::$method, $template), )+
                }
            }

            /// Stable kebab-case name used for lookup and logging.
            pub fn name(self) -> &'static str {
                match self {
                    $( Operation::$variant => $name, )+
                }
            }
        }
    };
}

operations! {
    // ==================== User ====================
    SiteInfo => "site-info", User, Get, "/v1/site/:site_id";
    PolicyList => "policy-list", User, Get, "/v1/policy/:site_id/:c_lang";
    PolicyDetail => "policy-detail", User, Get, "/v1/policy/detail/:idx";
    PopupList => "popup-list", User, Get, "/v1/popup/:site_id/:c_lang";
    BannerList => "banner-list", User, Get, "/v1/banner/:site_id/:c_lang";
    CategoryList => "category-list", User, Get, "/v1/category/:site_id/:c_lang";
    SubCategoryList => "sub-category-list", User, Get, "/v1/category/:site_id/:c_lang/:parent_id";
    PostList => "post-list", User, Get, "/v1/board/:id/posts";
    LatestPosts => "latest-posts", User, Get, "/v1/board/latest/:site_id/:limit";
    PostDetail => "post-detail", User, Get, "/v1/board/post/:idx";
    CreatePost => "create-post", User, Post, "/v1/board/:id/post";
    CommentList => "comment-list", User, Get, "/v1/comment/:idx";
    CreateComment => "create-comment", User, Post, "/v1/comment/:idx";
    DeleteComment => "delete-comment", User, Delete, "/v1/comment/:idx";
    Login => "login", User, Post, "/v1/member/login";
    Signup => "signup", User, Post, "/v1/member/signup";
    MyInfo => "my-info", User, Get, "/v1/member/me";

    // ==================== Console ====================
    ConsoleLogin => "console-login", Console, Post, "/v1/console/login";
    ConsoleSiteInfo => "console-site-info", Console, Get, "/v1/console/site/:site_id";
    UpdateSiteInfo => "update-site-info", Console, Put, "/v1/console/site/:site_id";
    MemberList => "member-list", Console, Get, "/v1/console/member/:site_id";
    MemberDetail => "member-detail", Console, Get, "/v1/console/member/detail/:idx";
    UpdateMember => "update-member", Console, Put, "/v1/console/member/detail/:idx";
    DeleteMember => "delete-member", Console, Delete, "/v1/console/member/detail/:idx";
    ConsolePolicyList => "console-policy-list", Console, Get, "/v1/console/policy/:site_id/:c_lang";
    UpdatePolicy => "update-policy", Console, Put, "/v1/console/policy/:idx";
    ConsoleCategoryList => "console-category-list", Console, Get, "/v1/console/category/:site_id/:c_lang";
    ConsoleSubCategoryList => "console-sub-category-list", Console, Get, "/v1/console/category/:site_id/:c_lang/:parent_id";
    CreateCategory => "create-category", Console, Post, "/v1/console/category/:site_id";
    UpdateCategory => "update-category", Console, Put, "/v1/console/category/detail/:id";
    DeleteCategory => "delete-category", Console, Delete, "/v1/console/category/detail/:id";
    ConsolePopupList => "console-popup-list", Console, Get, "/v1/console/popup/:site_id";
    PopupDetail => "popup-detail", Console, Get, "/v1/console/popup/detail/:idx";
    CreatePopup => "create-popup", Console, Post, "/v1/console/popup/:site_id";
    UpdatePopup => "update-popup", Console, Put, "/v1/console/popup/detail/:idx";
    DeletePopup => "delete-popup", Console, Delete, "/v1/console/popup/detail/:idx";
    ConsoleBannerList => "console-banner-list", Console, Get, "/v1/console/banner/:site_id";
    CreateBanner => "create-banner", Console, Post, "/v1/console/banner/:site_id";
    DeleteBanner => "delete-banner", Console, Delete, "/v1/console/banner/detail/:idx";
    ConsolePostList => "console-post-list", Console, Get, "/v1/console/board/:id/posts";
    DeletePost => "delete-post", Console, Delete, "/v1/console/board/post/:idx";
    ConsoleDeleteComment => "console-delete-comment", Console, Delete, "/v1/console/comment/:idx";
    AlarmList => "alarm-list", Console, Get, "/v1/console/alarm/:site_id/:follow";
    ReadAlarm => "read-alarm", Console, Put, "/v1/console/alarm/detail/:idx";
    VisitorStatistics => "visitor-statistics", Console, Get, "/v1/console/statistics/visitor/:site_id";
    MemberStatistics => "member-statistics", Console, Get, "/v1/console/statistics/member/:site_id";
}

impl Operation {
    pub fn from_name(name: &str) -> Option<Operation> {
        Operation::ALL.iter().copied().find(|op| op.name() == name)
    }

    pub fn audience(self) -> Audience {
        self.route().audience
    }

    pub fn method(self) -> HttpMethod {
        self.route().method
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Named values for a template's placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(BTreeMap<String, String>);

impl PathParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl ToString) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl ToString) {
        self.0.insert(name.to_string(), value.to_string());
    }

    /// Insert only if the caller has not already supplied `name`.
    pub fn insert_default(&mut self, name: &str, value: impl ToString) {
        self.0
            .entry(name.to_string())
            .or_insert_with(|| value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

impl<K: ToString, V: ToString> FromIterator<(K, V)> for PathParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        PathParams(
            iter.into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r":([a-z_]+)").unwrap())
}

/// Substitute `:name` placeholders verbatim; unknown names stay literal.
pub fn render_template(template: &str, params: &PathParams) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &regex::Captures| match params.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
