//! HTML for the user list page.
//!
//! Field values are interpolated as-is. Nothing is escaped.

use crate::store::User;

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="kr">
<head>
    <meta http-equiv="content-type" content="text/html; charset=UTF-8">
    <meta charset="utf-8">
    <title>SLiPP Java Web Programming</title>
    <meta name="viewport" content="width=device-width, initial-scale=1, maximum-scale=1">
    <link href="../css/bootstrap.min.css" rel="stylesheet">
    <link href="../css/styles.css" rel="stylesheet">
</head>
<body>
<nav class="navbar navbar-fixed-top header">
    <div class="col-md-12">
        <div class="navbar-header">
            <a href="../index.html" class="navbar-brand">SLiPP</a>
        </div>
        <div class="collapse navbar-collapse" id="navbar-collapse1">
            <ul class="nav navbar-nav navbar-right">
                <li><a href="../user/list.html"><i class="glyphicon glyphicon-user"></i></a></li>
            </ul>
        </div>
    </div>
</nav>
<div class="navbar navbar-default" id="subnav">
    <div class="col-md-12">
        <div class="collapse navbar-collapse" id="navbar-collapse2">
            <ul class="nav navbar-nav navbar-right">
                <li class="active"><a href="../index.html">Posts</a></li>
                <li><a href="../user/login.html" role="button">로그인</a></li>
                <li><a href="../user/form.html" role="button">회원가입</a></li>
            </ul>
        </div>
    </div>
</div>

<div class="container" id="main">
   <div class="col-md-10 col-md-offset-1">
      <div class="panel panel-default">
          <table class="table table-hover">
              <thead>
                <tr>
                    <th>#</th> <th>사용자 아이디</th> <th>이름</th> <th>이메일</th><th></th>
                </tr>
              </thead>
              <tbody>"#;

const TAIL: &str = r#"</tbody>
          </table>
        </div>
    </div>
</div>

<script src="../js/jquery-2.2.0.min.js"></script>
<script src="../js/bootstrap.min.js"></script>
<script src="../js/scripts.js"></script>
	</body>
</html>"#;

/// Renders the full list page, one numbered table row per user, starting at 1.
pub fn user_list(users: &[User]) -> String {
    let mut page = String::from(HEAD);
    for (n, user) in users.iter().enumerate() {
        page.push_str(&format!(
            "<tr>\n                    <th scope=\"row\">{}</th> <td>{}</td> <td>{}</td> <td>{}</td>\
             <td><a href=\"#\" class=\"btn btn-success\" role=\"button\">수정</a></td>\n                </tr>",
            n + 1,
            user.user_id,
            user.name,
            user.email,
        ));
    }
    page.push_str(TAIL);
    page
}
