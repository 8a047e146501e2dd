use maud::html;
use postpress::page::prelude::*;

use crate::layout::{SeoMeta, layout};

const SKILLS: [&str; 6] = ["iOS", "Flutter", "React", "Next.js", "RAG", "Agent"];

const INTERESTS: [(&str, &str); 4] = [
    ("篮球", "热爱篮球运动，享受团队协作的乐趣"),
    ("中国象棋", "享受博弈的乐趣，提升思维能力"),
    ("阅读", "保持学习的习惯，探索不同领域的知识"),
    ("AI 产品", "关注并评测最新的 AI 产品和技术"),
];

const CONTACTS: [(&str, &str, &str); 3] = [
    ("GitHub", "macong0420", "https://github.com/macong0420"),
    ("Twitter", "@Snipercccc", "https://x.com/Snipercccc"),
    ("邮件", "macong0420@gmail.com", "mailto:macong0420@gmail.com"),
];

pub struct About;

impl Route for About {
    fn urls(&self, _: &ContentCollection) -> Vec<String> {
        vec!["/about".into()]
    }

    fn render(&self, ctx: &PageContext) -> RenderResult {
        layout(
            html! {
                div.about {
                    h1 { "Just be funny~" }
                    p {
                        "👋 你好！我是一名客户端开发工程师，负责架构设计和核心功能开发。主要从事 iOS、Flutter 和前端开发工作，热衷于探索新技术，追求代码质量和用户体验的完美统一。在空闲时间，我会研究人工智能和 Web3 项目，同时运营着"
                        a href="https://bestblogs.dev" target="_blank" rel="noopener noreferrer" { "bestblogs.dev" }
                        "，每周发送 AI 精选文章，目前已有超过 2000 位订阅者。"
                    }

                    h2 { "技术栈" }
                    ul.skills {
                        @for skill in SKILLS {
                            li { (skill) }
                        }
                    }

                    h2 { "兴趣爱好" }
                    div.interests {
                        @for (title, description) in INTERESTS {
                            div.interest {
                                h3 { (title) }
                                p { (description) }
                            }
                        }
                    }

                    h2 { "关于博客" }
                    p {
                        "这里是我的数字花园，记录日常学习和思考的内容。你可以找到关于编程技术、人工智能、产品设计的文章，也可以看到我的阅读笔记和生活随想。"
                    }

                    h2 { "联系方式" }
                    ul.contacts {
                        @for (name, value, link) in CONTACTS {
                            li {
                                span.name { (name) }
                                a href=(link) target="_blank" rel="noopener noreferrer" { (value) }
                            }
                        }
                    }

                    div.subscribe {
                        h3 { "📬 免费订阅我的 AI 周刊" }
                        p { "每周精选高质量的 AI 文章，帮助你跟上人工智能的最新发展。" }
                        a.btn href="https://www.bestblogs.dev/#subscribe" target="_blank" rel="noopener noreferrer" { "立即订阅" }
                    }
                }
            },
            ctx,
            Some(SeoMeta {
                title: "关于我".to_string(),
                ..Default::default()
            }),
        )
        .into()
    }
}
