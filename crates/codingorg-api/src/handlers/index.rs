//! Browser test page.

use axum::response::Html;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
    <head>
        <title>codingorg</title>
    </head>
    <body>
        <h1>codingorg events</h1>
        <form action="" onsubmit="sendMessage(event)">
            <input type="text" id="messageText" autocomplete="off"/>
            <button>Send</button>
        </form>
        <ul id="messages">
        </ul>
        <script>
            var ws = new WebSocket(`ws://${location.host}/ws`);
            ws.onmessage = function(event) {
                var messages = document.getElementById("messages");
                var message = document.createElement("li");
                message.appendChild(document.createTextNode(event.data));
                messages.appendChild(message);
            };
            function sendMessage(event) {
                var input = document.getElementById("messageText");
                ws.send(input.value);
                input.value = "";
                event.preventDefault();
            }
        </script>
    </body>
</html>
"#;

/// GET / - Page that prints every event and sends typed text.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
