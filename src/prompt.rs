/// Fixed reply for the /start command.
pub const GREETING: &str = "Hi! I am an AI assistant. Ask me anything.";

/// System instruction sent with every completion request.
///
/// The `{{Field}}` tokens are descriptive text for the model to match
/// against the user's raw input; the program never substitutes them.
pub const SYSTEM_PROMPT: &str = "
按照这段描述来分析以下数据。
描述：在 {{Date}}，{{Chain}} 链上发生了一笔交易。资金从 {{From}} (地址: {{FromAddress}}) 转移到了 {{To}} (地址: {{ToAddress}})。这笔交易涉及 {{Amount}}  {{Token}} 代币，总价值约为 {{Value}} 美元。操作类型为 {{Action}}，当时的价格是 {{Price}} 美元。
从用户输入中寻找对应的字段，如果找不到则省略对应的话，可能输入有多条，以最后一条为准，向前找关联交易，也就是FromAddress或者ToAddress与最后一条数据的FromAddress或者ToAddress相同的数据，最后来一个总结将资金路由描述清楚";
