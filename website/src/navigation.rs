use postpress::navigation::{
    CategoryLink, NavigationConfig, NavigationEntry, NavigationSpec, category_route,
};

/// The menu used when no `navigation.yaml` is present.
pub fn site_navigation() -> NavigationSpec {
    NavigationSpec {
        main: vec![
            NavigationEntry::new("/", "首页", "home"),
            NavigationEntry::new("/about", "关于我", "user"),
        ],
        posts: vec![
            CategoryLink::new("dev", "编程开发", "laptop-code"),
            CategoryLink::new("ai", "人工智能", "brain"),
            CategoryLink::new("build", "构建之路", "rocket"),
            CategoryLink::new("reading", "阅读记录", "book"),
            CategoryLink::new("thoughts", "思考随笔", "lightbulb"),
        ],
        projects: vec![
            NavigationEntry::new("https://shuiyin.yc0501.online/", "图片水印", "code"),
            NavigationEntry::new("https://openalternative.co/", "开源替代", "code"),
        ],
        online: vec![
            NavigationEntry::new("https://github.com/macongcong", "GitHub", "github"),
            NavigationEntry::new("https://x.com/Snipercccc", "Twitter", "twitter"),
        ],
    }
}

/// Label of a category, falling back to its key for categories missing from the menu.
pub fn category_label<'a>(navigation: &'a NavigationConfig, key: &'a str) -> &'a str {
    let route = category_route(key);
    navigation
        .posts
        .iter()
        .find(|entry| entry.target.href() == route)
        .map(|entry| entry.label.as_str())
        .unwrap_or(key)
}
