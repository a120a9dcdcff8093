//! 工作人员介绍
//!
//! 静态数据，编译进二进制，顺序即页面展示顺序。

use serde::Serialize;

/// 一位工作人员
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StaffMember {
    pub name: &'static str,
    /// 头像路径（站内静态资源）
    pub image: &'static str,
    pub bio: &'static str,
}

/// 头像图片不随二进制内嵌，由部署时放到站点静态目录或 CDN
pub static STAFF: &[StaffMember] = &[
    StaffMember {
        name: "Prasoon Kharel",
        image: "/people/prasoon.jpg",
        bio: "Hey! I am brown and going to brown 😎. \
                I graduated from Brookings High School, where I did Policy for one year and Lincoln-Douglas for three. \
                Some of my major accomplishments include losing to Catherine every round since sophomore year and winning 7 ballots at nationals two times in a row. \
                Just thankful to be here!",
    },
    StaffMember {
        name: "Aditya Tummala",
        image: "/people/Aditya.jpg",
        bio: "Hello! \
                I’m an incoming senior at Brookings High School and I compete in Public Forum debate and International Extemporaneous Speaking. \
                I am a 2-time National Qualifier, State Champion in Extemp, and national elimination round qualifier; and I’m very enthusiastic about inspiring others to love debate as much as I do! \
                Outside of debate, I love fishing with Elijah, playing soccer and tennis, cooking/eating, and hanging out with the others in the debate community!",
    },
    StaffMember {
        name: "Catherine Liu",
        image: "/people/catherine 2.png",
        bio: "Hi! \
                I graduated from Sioux Falls Washington in 2021 and will be attending Harvard in the fall. \
                I competed in Lincoln-Douglas for four years, where I was a national runner-up, 2-time state champion, and 3-time national elimination round qualifier. \
                Debate gave me invaluable advocacy skills, so I’m excited to introduce new debaters to this amazing community!",
    },
    StaffMember {
        name: "Carter Demaray",
        image: "/people/Carter Pic.jpg",
        bio: "Hey everyone! \
                I graduated from Yankton HS this year and will be attending Harvard in the fall. \
                I competed in public forum for four years, where I was a state champion (with Lauren!) and a two-time national qualifier (+ once in DX), and a national elimination round qualifier. \
                Debate has helped me in unimaginable ways by giving me the tools to succeed. I hope to help you access those tools as well so you too can succeed. \
                Always remember to do your best and have fun :)",
    },
    StaffMember {
        name: "Lauren Gillis",
        image: "/people/Lauren.JPG",
        bio: "Hola folks! \
                I just graduated from Yankton where I competed in Public Forum for all four years. \
                I’ve qualified twice for the NSDA national tournament (+ once in Extemp) with my partner, Carter, and we were the 2021 State Champs. \
                I will be at Macalester College in St. Paul this fall, majoring in education and perhaps English. Debate taught me to be confident in my voice and who I am, and I’ve made so many friends through the activity. \
                I hope debate can be a home for all of y’all too :)",
    },
    StaffMember {
        name: "Srishti Kumari",
        image: "/people/prasoon.jpg",
        bio: "Hey! I graduated from Sioux Falls Roosevelt where I debated in Policy and Public Forum for two years each. \
                In Public Forum, I was a 2-time NSDA national qualifier and part of the first South Dakota team to participate in the Tournament of Champions, receiving 6 bids over two years. \
                I am an incoming freshman at Duke, where I plan to study neuroscience. \
                I already miss the debate world, so I’m excited to share my passion with new debaters!",
    },
    StaffMember {
        name: "Katherine Escalante",
        image: "/people/katherine.JPG",
        bio: "Hey y'all! I participated in debate all 4 years of highschool and graduated from SF Washington in 2021. \
                I'm a 3-time national qualifier and a state runner up in a public forum. \
                This fall I am attending Eastern Connecticut University on a full ride where I will plan to study political science and philosophy with a concentration in international relations. \
                Debate helped me find  my passion in life and gave me the skills/ confidence to pursue it. I'm very excited to help teach others some of the things I learned along the way!",
    },
    StaffMember {
        name: "Elijah Manzer",
        image: "/people/Elijah.jpeg",
        bio: "Hello friends! \
                I am going to be a senior at Brookings High School next year. \
                I have competed in debate for two years. I usually do Public Forum debate and Domestic Extemp. \
                I am very passionate about debate and want to try my best to make it a great experience for everyone competing. \
                I enjoy reading, watching movies, and catching more fish than Aditya!",
    },
    StaffMember {
        name: "Sam Markley",
        image: "/people/Sam.jpg",
        bio: "Hey everyone! \
                I'm going into my senior year at Washington High School in Sioux Falls. I've competed in Lincoln Douglas since I started debate and broke to elimination rounds this year at nationals. \
                Debate has helped me find my voice and become more confident as a speaker, all while being a ton of fun! I can't wait to introduce debaters to this amazing activity and community!",
    },
];
